use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, ToSchema)]
pub struct PayrollInput {
    #[schema(example = 52000.0)]
    pub base_salary: f64,
    #[serde(default)]
    #[schema(example = 5000.0)]
    pub bonus: f64,
    #[serde(default)]
    #[schema(example = 2000.0)]
    pub deductions: f64,
}

/// Salary figures after loss-of-pay days are deducted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PayrollBreakdown {
    pub base_salary: f64,
    pub bonus: f64,
    pub deductions: f64,
    #[schema(example = 2000.0)]
    pub per_day_salary: f64,
    #[schema(example = 21)]
    pub payable_days: u32,
    #[schema(example = 10000.0)]
    pub lop_deduction: f64,
    #[schema(example = 57000.0)]
    pub gross_salary: f64,
    #[schema(example = 45000.0)]
    pub net_salary: f64,
}
