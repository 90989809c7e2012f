use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DayStatus {
    Present,
    Absent,
    OnLeave,
    WorkingSunday,
    NoRecord,
    Future,
}

impl DayStatus {
    /// Statuses whose hours go into the month's worked-hours total.
    /// Only `Present` counts as a worked day.
    pub fn counts_hours(self) -> bool {
        matches!(self, DayStatus::Present | DayStatus::WorkingSunday)
    }
}

/// Classification of one calendar date for one employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "date": "2024-03-01",
        "status": "present",
        "worked_hours": 8.0,
        "check_in": "09:00",
        "check_out": "17:00",
        "still_working": false,
        "incomplete": false,
        "invalid": false,
        "holiday": null
    })
)]
pub struct DayClassification {
    #[schema(value_type = String, format = "date")]
    pub date: NaiveDate,
    pub status: DayStatus,
    /// 0 when not applicable or when the times were unusable.
    pub worked_hours: f64,
    #[schema(nullable = true)]
    pub check_in: Option<String>,
    #[schema(nullable = true)]
    pub check_out: Option<String>,
    /// Checked in today and not yet checked out.
    pub still_working: bool,
    /// Past day with a check-in that was never closed out.
    pub incomplete: bool,
    /// Times could not be parsed or exceeded the daily limit.
    pub invalid: bool,
    #[schema(nullable = true)]
    pub holiday: Option<String>,
}

impl DayClassification {
    pub fn new(date: NaiveDate, status: DayStatus) -> Self {
        Self {
            date,
            status,
            worked_hours: 0.0,
            check_in: None,
            check_out: None,
            still_working: false,
            incomplete: false,
            invalid: false,
            holiday: None,
        }
    }

    /// Label for calendars and tables. An unclosed past day reads "Pending"
    /// even though it is aggregated as not worked.
    pub fn display_label(&self) -> &'static str {
        if self.incomplete {
            return "Pending";
        }
        match self.status {
            DayStatus::Present if self.still_working => "Working",
            DayStatus::Present => "Present",
            DayStatus::Absent => "Absent",
            DayStatus::OnLeave => "On Leave",
            DayStatus::WorkingSunday => "Working Sunday",
            DayStatus::NoRecord => "No Record",
            DayStatus::Future => "",
        }
    }
}
