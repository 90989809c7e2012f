pub mod absence;
pub mod attendance;
pub mod day;
pub mod holiday;
pub mod leave_request;
pub mod metrics;
pub mod payroll;
pub mod snapshot;

pub use absence::AbsenceRecord;
pub use attendance::AttendanceRecord;
pub use day::{DayClassification, DayStatus};
pub use holiday::HolidayRecord;
pub use leave_request::{LeaveRecord, LeaveStatus};
pub use metrics::PeriodMetrics;
pub use payroll::{PayrollBreakdown, PayrollInput};
pub use snapshot::RecordSnapshot;
