use crate::api::RecordPayload;
use crate::api::attendance::{DayRequest, DurationRequest, SummaryRequest, SummaryResponse};
use crate::api::payroll::{PayrollPreviewRequest, PayrollPreviewResponse};
use crate::derivation::DurationResult;
use crate::model::{
    AbsenceRecord, AttendanceRecord, DayClassification, DayStatus, HolidayRecord, LeaveRecord,
    LeaveStatus, PayrollBreakdown, PayrollInput, PeriodMetrics,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "HRM Attendance API",
        version = "0.1.0",
        description = r#"
## Attendance derivation

Turns raw check-in/check-out, leave, absence and holiday records into
per-day statuses and monthly metrics.

### Key Features
- **Duration**: worked hours for a check-in/check-out pair, with midnight wrap-around and a 16h daily limit
- **Day classification**: Present, Absent, On Leave, Working Sunday, No Record or Future
- **Monthly summary**: standard working days, worked days, loss-of-pay days, worked hours, approved leave, attendance days
- **Payroll preview**: salary with loss-of-pay deduction

### Input
Callers send the records they fetched, already joined for the whole window.
Collections may be bare arrays or `{records: [...]}` envelopes and may use
`check_in`/`checkIn`, `email`/`employee_email`/`employee_id` and similar spellings.

### Failure behaviour
Bad records are skipped or flagged and never fail the month. An invalid
month yields zeroed metrics with an `error` message.
"#,
    ),
    paths(
        crate::api::attendance::duration,
        crate::api::attendance::classify,
        crate::api::attendance::summary,
        crate::api::payroll::preview
    ),
    components(
        schemas(
            RecordPayload,
            DurationRequest,
            DurationResult,
            DayRequest,
            SummaryRequest,
            SummaryResponse,
            PayrollPreviewRequest,
            PayrollPreviewResponse,
            PayrollInput,
            PayrollBreakdown,
            AttendanceRecord,
            LeaveRecord,
            LeaveStatus,
            AbsenceRecord,
            HolidayRecord,
            DayClassification,
            DayStatus,
            PeriodMetrics
        )
    ),
    tags(
        (name = "Attendance", description = "Worked time and attendance state"),
        (name = "Payroll", description = "Loss-of-pay salary preview"),
    )
)]
pub struct ApiDoc;
