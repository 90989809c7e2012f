use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};
use utoipa::ToSchema;

use super::attendance::SummaryRequest;
use crate::derivation::compute_payroll;
use crate::model::{PayrollBreakdown, PayrollInput, PeriodMetrics};

#[derive(Debug, Deserialize, ToSchema)]
pub struct PayrollPreviewRequest {
    #[serde(flatten)]
    pub summary: SummaryRequest,
    #[serde(flatten)]
    pub pay: PayrollInput,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PayrollPreviewResponse {
    pub metrics: PeriodMetrics,
    /// Absent when the month could not be aggregated.
    #[schema(nullable = true)]
    pub payroll: Option<PayrollBreakdown>,
    #[schema(nullable = true)]
    pub error: Option<String>,
    pub skipped_records: usize,
}

/// Payroll figures for a month with loss-of-pay days deducted
#[utoipa::path(
    post,
    path = "/api/payroll/preview",
    request_body = PayrollPreviewRequest,
    responses(
        (status = 200, description = "Month metrics and salary breakdown", body = PayrollPreviewResponse),
        (status = 400, description = "Negative or non-numeric amounts", body = Object, example = json!({
            "message": "Configuration error: base_salary must be a non-negative amount"
        }))
    ),
    tag = "Payroll"
)]
#[instrument(name = "payroll_preview", skip(payload), fields(employee_id = %payload.summary.employee_id))]
pub async fn preview(
    payload: web::Json<PayrollPreviewRequest>,
) -> actix_web::Result<impl Responder> {
    let summary = payload.summary.summarize();

    if summary.error.is_some() {
        return Ok(HttpResponse::Ok().json(PayrollPreviewResponse {
            metrics: summary.metrics,
            payroll: None,
            error: summary.error,
            skipped_records: summary.skipped_records,
        }));
    }

    let payroll = match compute_payroll(&summary.metrics, payload.pay) {
        Ok(p) => p,
        Err(e) => {
            warn!(error = %e, "Rejected payroll amounts");
            return Ok(HttpResponse::BadRequest().json(serde_json::json!({
                "message": e.to_string()
            })));
        }
    };

    Ok(HttpResponse::Ok().json(PayrollPreviewResponse {
        metrics: summary.metrics,
        payroll: Some(payroll),
        error: None,
        skipped_records: summary.skipped_records,
    }))
}
