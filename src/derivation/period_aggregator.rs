use chrono::{Month, NaiveDate, NaiveDateTime};
use tracing::{info, instrument, warn};

use crate::derivation::day_classifier::{EmployeeRecords, classify_day, is_sunday};
use crate::derivation::time_interval::round2;
use crate::error::{DerivationError, DerivationResult};
use crate::model::{DayClassification, DayStatus, PeriodMetrics, RecordSnapshot};

/// A calendar month, first to last day inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthWindow {
    year: i32,
    month: u32,
    first: NaiveDate,
    last: NaiveDate,
}

impl MonthWindow {
    pub fn new(year: i32, month: u32) -> DerivationResult<Self> {
        let invalid =
            || DerivationError::ConfigurationError(format!("invalid month {year}-{month}"));

        let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
        let next = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        };
        let last = next.and_then(|d| d.pred_opt()).ok_or_else(invalid)?;

        Ok(Self {
            year,
            month,
            first,
            last,
        })
    }

    /// Accepts `3`, `03`, `March` or `mar`.
    pub fn parse(year: i32, month: &str) -> DerivationResult<Self> {
        let month = month.trim();
        let number = match month.parse::<u32>() {
            Ok(n) => n,
            Err(_) => month
                .parse::<Month>()
                .map(|m| m.number_from_month())
                .map_err(|_| {
                    DerivationError::ConfigurationError(format!("unrecognized month '{month}'"))
                })?,
        };
        Self::new(year, number)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    pub fn last_day(&self) -> NaiveDate {
        self.last
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.first.iter_days().take_while(move |d| *d <= self.last)
    }
}

/// Month summary for `employee_id`, `month` given as number or name.
pub fn aggregate_month(
    employee_id: &str,
    year: i32,
    month: &str,
    snapshot: &RecordSnapshot,
    reference_now: NaiveDateTime,
) -> DerivationResult<PeriodMetrics> {
    if employee_id.trim().is_empty() {
        return Err(DerivationError::ConfigurationError(
            "employee id must not be empty".to_string(),
        ));
    }
    let window = MonthWindow::parse(year, month)?;
    Ok(aggregate_window(employee_id, &window, snapshot, reference_now))
}

/// Like [`aggregate_month`], but a bad window gives zeroed metrics alongside
/// the error so a dashboard can render its "no data" state.
pub fn aggregate_month_or_zeroed(
    employee_id: &str,
    year: i32,
    month: &str,
    snapshot: &RecordSnapshot,
    reference_now: NaiveDateTime,
) -> (PeriodMetrics, Option<DerivationError>) {
    match aggregate_month(employee_id, year, month, snapshot, reference_now) {
        Ok(metrics) => (metrics, None),
        Err(e) => {
            warn!(employee_id, year, month, error = %e, "Falling back to zeroed metrics");
            (PeriodMetrics::zeroed(employee_id, year, 0), Some(e))
        }
    }
}

#[instrument(
    skip(snapshot, window),
    fields(year = window.year(), month = window.month(), attendance = snapshot.attendance.len())
)]
pub fn aggregate_window(
    employee_id: &str,
    window: &MonthWindow,
    snapshot: &RecordSnapshot,
    reference_now: NaiveDateTime,
) -> PeriodMetrics {
    let records = EmployeeRecords::build(employee_id, snapshot);
    let leave_dates = records.approved_leave_dates(window.first_day(), window.last_day());

    let daily_timeline: Vec<DayClassification> = window
        .days()
        .map(|date| classify_day(date, &records, reference_now))
        .collect();

    let standard_working_days = count(window.days().filter(|d| !is_sunday(*d)));
    let worked_days = count(
        daily_timeline
            .iter()
            .filter(|d| d.status == DayStatus::Present),
    );
    let approved_leave_days = count(
        daily_timeline
            .iter()
            .filter(|d| d.status == DayStatus::OnLeave),
    );
    let lop_days = count(daily_timeline.iter().filter(|d| {
        !is_sunday(d.date) && !matches!(d.status, DayStatus::Present | DayStatus::OnLeave)
    }));
    let total_worked_hours = round2(
        daily_timeline
            .iter()
            .filter(|d| d.status.counts_hours())
            .map(|d| d.worked_hours)
            .sum(),
    );
    let attendance_days = count(window.days().filter(|&date| {
        records.attendance_on(date).is_some_and(|r| r.has_check_in())
            || leave_dates.contains(&date)
            || is_sunday(date)
    }));
    let attendance_rate = if standard_working_days == 0 {
        0.0
    } else {
        round2(f64::from(worked_days) / f64::from(standard_working_days) * 100.0)
    };

    info!(
        employee_id,
        worked_days, lop_days, approved_leave_days, total_worked_hours, "Aggregated month"
    );

    PeriodMetrics {
        employee_id: employee_id.to_string(),
        year: window.year(),
        month: window.month(),
        standard_working_days,
        worked_days,
        lop_days,
        total_worked_hours,
        approved_leave_days,
        attendance_days,
        attendance_rate,
        daily_timeline,
    }
}

fn count<I: Iterator>(iter: I) -> u32 {
    iter.fold(0, |n, _| n + 1)
}
