use actix_web::{HttpResponse, Responder, web};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use utoipa::ToSchema;

use super::{RecordPayload, resolve_now};
use crate::derivation::{
    EmployeeRecords, aggregate_month_or_zeroed, classify_day, compute_duration,
};
use crate::model::PeriodMetrics;

/// Month as a number (`3`) or a name (`"March"`, `"mar"`).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MonthInput {
    Number(u32),
    Name(String),
}

impl MonthInput {
    pub fn as_text(&self) -> String {
        match self {
            MonthInput::Number(n) => n.to_string(),
            MonthInput::Name(s) => s.clone(),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct DurationRequest {
    #[schema(example = "2024-03-05", value_type = String, format = "date")]
    pub date: NaiveDate,
    #[schema(example = "23:00", nullable = true)]
    pub check_in: Option<String>,
    #[schema(example = "01:00", nullable = true)]
    pub check_out: Option<String>,
    #[serde(default)]
    #[schema(example = "2024-03-06T09:00:00", value_type = Option<String>, format = "date-time")]
    pub reference_now: Option<NaiveDateTime>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct DayRequest {
    #[schema(example = "alice@co.com")]
    pub employee_id: String,
    #[schema(example = "2024-03-05", value_type = String, format = "date")]
    pub date: NaiveDate,
    #[serde(default)]
    #[schema(example = "2024-04-01T09:00:00", value_type = Option<String>, format = "date-time")]
    pub reference_now: Option<NaiveDateTime>,
    #[serde(flatten)]
    pub records: RecordPayload,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SummaryRequest {
    #[schema(example = "alice@co.com")]
    pub employee_id: String,
    #[schema(example = 2024)]
    pub year: i32,
    #[schema(example = "March", value_type = String)]
    pub month: MonthInput,
    #[serde(default)]
    #[schema(example = "2024-04-01T09:00:00", value_type = Option<String>, format = "date-time")]
    pub reference_now: Option<NaiveDateTime>,
    #[serde(flatten)]
    pub records: RecordPayload,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SummaryResponse {
    pub metrics: PeriodMetrics,
    /// Set when the window was rejected and `metrics` is the zeroed fallback.
    #[schema(example = json!(null), nullable = true)]
    pub error: Option<String>,
    /// Input elements that could not be adapted and were left out.
    #[schema(example = 0)]
    pub skipped_records: usize,
}

impl SummaryRequest {
    pub(crate) fn summarize(&self) -> SummaryResponse {
        let (snapshot, skipped_records) = self.records.to_snapshot();
        let (metrics, error) = aggregate_month_or_zeroed(
            &self.employee_id,
            self.year,
            &self.month.as_text(),
            &snapshot,
            resolve_now(self.reference_now),
        );

        SummaryResponse {
            metrics,
            error: error.map(|e| e.to_string()),
            skipped_records,
        }
    }
}

/// Worked hours for one check-in/check-out pair
#[utoipa::path(
    post,
    path = "/api/attendance/duration",
    request_body(
        content = DurationRequest,
        description = "Clock times for one day",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Computed duration", body = crate::derivation::DurationResult),
        (status = 400, description = "Malformed request body")
    ),
    tag = "Attendance"
)]
pub async fn duration(payload: web::Json<DurationRequest>) -> actix_web::Result<impl Responder> {
    let result = compute_duration(
        payload.date,
        payload.check_in.as_deref(),
        payload.check_out.as_deref(),
        resolve_now(payload.reference_now),
    );
    Ok(HttpResponse::Ok().json(result))
}

/// Classify one calendar day for one employee
#[utoipa::path(
    post,
    path = "/api/attendance/day",
    request_body(
        content = DayRequest,
        description = "Employee, date and the raw record collections",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Day classification", body = crate::model::DayClassification),
        (status = 400, description = "Missing employee id", body = Object, example = json!({
            "message": "employee_id must not be empty"
        }))
    ),
    tag = "Attendance"
)]
#[instrument(name = "attendance_day", skip(payload), fields(employee_id = %payload.employee_id, date = %payload.date))]
pub async fn classify(payload: web::Json<DayRequest>) -> actix_web::Result<impl Responder> {
    if payload.employee_id.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "message": "employee_id must not be empty"
        })));
    }

    let (snapshot, skipped) = payload.records.to_snapshot();
    let records = EmployeeRecords::build(&payload.employee_id, &snapshot);
    let day = classify_day(payload.date, &records, resolve_now(payload.reference_now));

    info!(status = %day.status, skipped, "Classified day");
    Ok(HttpResponse::Ok().json(day))
}

/// Monthly attendance summary for one employee
#[utoipa::path(
    post,
    path = "/api/attendance/summary",
    request_body(
        content = SummaryRequest,
        description = "Month window and a fully joined record snapshot",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Month metrics, zeroed with `error` set when the window is invalid", body = SummaryResponse),
        (status = 400, description = "Malformed request body")
    ),
    tag = "Attendance"
)]
#[instrument(name = "attendance_summary", skip(payload), fields(employee_id = %payload.employee_id, year = payload.year))]
pub async fn summary(payload: web::Json<SummaryRequest>) -> actix_web::Result<impl Responder> {
    let response = payload.summarize();
    Ok(HttpResponse::Ok().json(response))
}
