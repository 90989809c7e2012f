use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Calendar holiday. Display annotation only, never affects worked time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HolidayRecord {
    #[schema(example = "2024-03-26", value_type = String, format = "date")]
    pub date: NaiveDate,
    #[schema(example = "Independence Day")]
    pub summary: String,
    #[schema(example = "government", nullable = true)]
    pub holiday_type: Option<String>,
}
