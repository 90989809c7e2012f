//! Worked time and attendance state derived from raw check-in/check-out,
//! leave and absence records.
//!
//! Everything here is a pure function of its inputs. The caller supplies
//! the wall clock as `reference_now`.

pub mod day_classifier;
pub mod payroll;
pub mod period_aggregator;
pub mod time_interval;

pub use day_classifier::{EmployeeRecords, classify_day};
pub use payroll::compute_payroll;
pub use period_aggregator::{
    MonthWindow, aggregate_month, aggregate_month_or_zeroed, aggregate_window,
};
pub use time_interval::{DurationResult, MAX_DAILY_HOURS, compute_duration, parse_time_of_day};
