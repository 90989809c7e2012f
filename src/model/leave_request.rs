use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LeaveStatus {
    Approved,
    Pending,
    Rejected,
}

/// An approved, pending or rejected leave request over an inclusive date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LeaveRecord {
    #[schema(example = "alice@co.com")]
    pub employee_id: String,
    #[schema(example = "2024-03-08", value_type = String, format = "date")]
    pub start_date: NaiveDate,
    #[schema(example = "2024-03-12", value_type = String, format = "date")]
    pub end_date: NaiveDate,
    pub status: LeaveStatus,
    #[schema(example = "sick", nullable = true)]
    pub leave_type: Option<String>,
    #[schema(example = "family event", nullable = true)]
    pub reason: Option<String>,
}

impl LeaveRecord {
    pub fn new(
        employee_id: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        status: LeaveStatus,
    ) -> Self {
        Self {
            employee_id: employee_id.into(),
            start_date,
            end_date,
            status,
            leave_type: None,
            reason: None,
        }
    }

    pub fn is_approved(&self) -> bool {
        self.status == LeaveStatus::Approved
    }

    pub fn is_well_formed(&self) -> bool {
        self.start_date <= self.end_date
    }

    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    /// Every date of the leave that also falls inside `[from, to]`.
    pub fn dates_within(&self, from: NaiveDate, to: NaiveDate) -> impl Iterator<Item = NaiveDate> {
        let start = self.start_date.max(from);
        let end = self.end_date.min(to);
        start.iter_days().take_while(move |d| *d <= end)
    }
}
