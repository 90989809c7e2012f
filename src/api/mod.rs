pub mod attendance;
pub mod payroll;

use chrono::{Local, NaiveDateTime};
use serde::Deserialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::model::RecordSnapshot;
use crate::utils::normalize::snapshot_from_json;

/// Raw backend collections as fetched by the caller. Each may be a bare
/// array or a `{records: [...]}` envelope, with any of the known field
/// spellings.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct RecordPayload {
    #[serde(default)]
    #[schema(value_type = Object, example = json!([{"email": "alice@co.com", "date": "2024-03-01", "checkIn": "09:00", "checkOut": "17:00"}]))]
    pub attendance: Value,
    #[serde(default)]
    #[schema(value_type = Object, example = json!({"records": [{"email": "alice@co.com", "startDate": "2024-03-25", "endDate": "2024-03-25", "status": "Approved"}]}))]
    pub leaves: Value,
    #[serde(default)]
    #[schema(value_type = Object, example = json!([{"employee_email": "alice@co.com", "date": "2024-03-26"}]))]
    pub absences: Value,
    #[serde(default)]
    #[schema(value_type = Object, example = json!([{"summary": "Independence Day", "date": "2024-03-26", "type": "government"}]))]
    pub holidays: Value,
}

impl RecordPayload {
    pub fn to_snapshot(&self) -> (RecordSnapshot, usize) {
        snapshot_from_json(&self.attendance, &self.leaves, &self.absences, &self.holidays)
    }
}

/// The core never reads the clock; requests may pin it, otherwise the
/// server's local time is used.
pub(crate) fn resolve_now(reference_now: Option<NaiveDateTime>) -> NaiveDateTime {
    reference_now.unwrap_or_else(|| Local::now().naive_local())
}
