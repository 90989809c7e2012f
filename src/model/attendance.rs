use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One check-in/check-out pair for one employee on one calendar date.
///
/// Times are kept as the strings the backend delivered; they are parsed
/// when a duration is computed so that one malformed value only affects
/// its own day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "employee_id": "alice@co.com",
        "date": "2024-03-01",
        "check_in": "09:00",
        "check_out": "17:00"
    })
)]
pub struct AttendanceRecord {
    #[schema(example = "alice@co.com")]
    pub employee_id: String,

    #[schema(example = "2024-03-01", value_type = String, format = "date")]
    pub date: NaiveDate,

    #[schema(example = "09:00", nullable = true)]
    pub check_in: Option<String>,

    #[schema(example = "17:00", nullable = true)]
    pub check_out: Option<String>,
}

impl AttendanceRecord {
    pub fn new(
        employee_id: impl Into<String>,
        date: NaiveDate,
        check_in: Option<&str>,
        check_out: Option<&str>,
    ) -> Self {
        Self {
            employee_id: employee_id.into(),
            date,
            check_in: non_empty(check_in),
            check_out: non_empty(check_out),
        }
    }

    pub fn check_in(&self) -> Option<&str> {
        self.check_in.as_deref().filter(|s| !s.trim().is_empty())
    }

    pub fn check_out(&self) -> Option<&str> {
        self.check_out.as_deref().filter(|s| !s.trim().is_empty())
    }

    /// A record cannot end without having started.
    pub fn is_consistent(&self) -> bool {
        self.check_out().is_none() || self.check_in().is_some()
    }

    /// Consistent and carrying a check-in, i.e. evidence of attendance.
    pub fn has_check_in(&self) -> bool {
        self.check_in().is_some()
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
