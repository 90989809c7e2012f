use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// An explicit "marked absent" entry, distinct from simply lacking attendance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AbsenceRecord {
    #[schema(example = "alice@co.com")]
    pub employee_id: String,
    #[schema(example = "2024-03-14", value_type = String, format = "date")]
    pub date: NaiveDate,
    #[schema(example = "no show", nullable = true)]
    pub reason: Option<String>,
}

impl AbsenceRecord {
    pub fn new(employee_id: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            employee_id: employee_id.into(),
            date,
            reason: None,
        }
    }
}
