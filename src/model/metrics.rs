use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::day::DayClassification;

/// Month summary for one employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PeriodMetrics {
    #[schema(example = "alice@co.com")]
    pub employee_id: String,
    #[schema(example = 2024)]
    pub year: i32,
    #[schema(example = 3)]
    pub month: u32,
    /// Non-Sunday days in the month.
    #[schema(example = 26)]
    pub standard_working_days: u32,
    #[schema(example = 20)]
    pub worked_days: u32,
    #[schema(example = 5)]
    pub lop_days: u32,
    #[schema(example = 160.0)]
    pub total_worked_hours: f64,
    #[schema(example = 1)]
    pub approved_leave_days: u32,
    /// Union of attended dates, approved-leave dates and Sundays. Looser
    /// than `worked_days`, used for dashboard cards.
    #[schema(example = 26)]
    pub attendance_days: u32,
    /// `worked_days / standard_working_days` as a percentage.
    #[schema(example = 76.92)]
    pub attendance_rate: f64,
    pub daily_timeline: Vec<DayClassification>,
}

impl PeriodMetrics {
    /// The "no data" value shown when a window cannot be aggregated.
    pub fn zeroed(employee_id: impl Into<String>, year: i32, month: u32) -> Self {
        Self {
            employee_id: employee_id.into(),
            year,
            month,
            standard_working_days: 0,
            worked_days: 0,
            lop_days: 0,
            total_worked_hours: 0.0,
            approved_leave_days: 0,
            attendance_days: 0,
            attendance_rate: 0.0,
            daily_timeline: Vec::new(),
        }
    }
}
