use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use tracing::warn;
use utoipa::ToSchema;

use crate::error::{DerivationError, DerivationResult};

/// A single day's worked time cannot exceed this.
pub const MAX_DAILY_HOURS: f64 = 16.0;

const MINUTES_PER_DAY: i64 = 24 * 60;

const TIME_FORMATS: &[&str] = &[
    "%H:%M",
    "%H:%M:%S",
    "%H:%M:%S%.f",
    "%I:%M %p",
    "%I:%M%p",
    "%I:%M:%S %p",
];

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"];

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, ToSchema)]
pub struct DurationResult {
    /// Worked hours, two decimals. 0 when unusable.
    #[schema(example = 8.5)]
    pub hours: f64,
    pub still_working: bool,
    /// Open check-in on a day other than today.
    pub incomplete: bool,
    pub invalid: bool,
}

/// Parses a clock time as delivered by attendance capture: `HH:MM`,
/// `HH:MM:SS`, 12-hour `hh:mm AM`, or a full timestamp whose time part is used.
pub fn parse_time_of_day(raw: &str) -> DerivationResult<NaiveTime> {
    let raw = raw.trim();

    if let Some(t) = TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(raw, fmt).ok())
    {
        return Ok(t);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.naive_local().time());
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.time())
        .ok_or_else(|| DerivationError::MalformedTimeInput(format!("unparseable time '{raw}'")))
}

/// Worked time for `date` from its check-in and check-out.
///
/// A check-out earlier than the check-in is a shift crossing midnight and
/// wraps by 24h. An open check-in only counts when `date` is the day of
/// `reference_now`. Unusable input yields 0 hours with `invalid` set.
pub fn compute_duration(
    date: NaiveDate,
    check_in: Option<&str>,
    check_out: Option<&str>,
    reference_now: NaiveDateTime,
) -> DurationResult {
    let Some(check_in) = check_in.filter(|s| !s.trim().is_empty()) else {
        return DurationResult::default();
    };
    let check_out = check_out.filter(|s| !s.trim().is_empty());

    let is_today = date == reference_now.date();
    let mut result = DurationResult {
        still_working: check_out.is_none() && is_today,
        incomplete: check_out.is_none() && !is_today,
        ..DurationResult::default()
    };
    if result.incomplete {
        return result;
    }

    let hours = match check_out {
        Some(check_out) => closed_hours(check_in, check_out),
        None => open_hours(check_in, reference_now.time()),
    }
    .and_then(within_daily_limit);

    match hours {
        Ok(hours) => result.hours = hours,
        Err(e) => {
            warn!(%date, error = %e, "Discarding unusable attendance times");
            result.invalid = true;
        }
    }
    result
}

fn closed_hours(check_in: &str, check_out: &str) -> DerivationResult<f64> {
    let start = parse_time_of_day(check_in)?;
    let end = parse_time_of_day(check_out)?;

    let mut minutes = (end - start).num_minutes();
    if minutes < 0 {
        minutes += MINUTES_PER_DAY;
    }
    Ok(minutes as f64 / 60.0)
}

fn open_hours(check_in: &str, now: NaiveTime) -> DerivationResult<f64> {
    let start = parse_time_of_day(check_in)?;
    // clock read before the check-in: nothing elapsed yet
    let minutes = (now - start).num_minutes().max(0);
    Ok(minutes as f64 / 60.0)
}

fn within_daily_limit(hours: f64) -> DerivationResult<f64> {
    if !(0.0..=MAX_DAILY_HOURS).contains(&hours) {
        return Err(DerivationError::MalformedTimeInput(format!(
            "{hours:.2}h is outside 0..={MAX_DAILY_HOURS}h"
        )));
    }
    Ok(round2(hours))
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
    }

    fn later() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 4, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_regular_day() {
        let r = compute_duration(day(), Some("09:00"), Some("17:30"), later());
        assert_eq!(r.hours, 8.5);
        assert!(!r.invalid && !r.still_working && !r.incomplete);
    }

    #[test]
    fn test_later_checkout_never_shortens_the_day() {
        let mut previous = 0.0;
        for minute in (0..=(14 * 60)).step_by(7) {
            let out = NaiveTime::from_hms_opt(9, 0, 0).unwrap() + chrono::Duration::minutes(minute);
            let r = compute_duration(
                day(),
                Some("09:00"),
                Some(&out.format("%H:%M").to_string()),
                later(),
            );
            assert!(r.hours >= previous, "{} < {} at +{}m", r.hours, previous, minute);
            previous = r.hours;
        }
    }

    #[test]
    fn test_shift_crossing_midnight_wraps() {
        let r = compute_duration(day(), Some("23:00"), Some("01:00"), later());
        assert_eq!(r.hours, 2.0);
        assert!(!r.invalid);
    }

    #[test]
    fn test_daily_limit() {
        let r = compute_duration(day(), Some("08:00"), Some("23:30"), later());
        assert_eq!(r.hours, 15.5);
        assert!(!r.invalid);

        // wraps to 23h
        let r = compute_duration(day(), Some("08:00"), Some("07:00"), later());
        assert_eq!(r.hours, 0.0);
        assert!(r.invalid);
    }

    #[test]
    fn test_missing_check_in() {
        let r = compute_duration(day(), None, None, later());
        assert_eq!(r, DurationResult::default());

        let r = compute_duration(day(), Some("  "), Some("17:00"), later());
        assert_eq!(r.hours, 0.0);
        assert!(!r.still_working);
    }

    #[test]
    fn test_open_check_in_today_counts_elapsed_time() {
        let now = day().and_hms_opt(13, 45, 0).unwrap();
        let r = compute_duration(day(), Some("09:00"), None, now);
        assert!(r.still_working);
        assert!(!r.incomplete);
        assert!((r.hours - 4.75).abs() < 0.01);
    }

    #[test]
    fn test_open_check_in_on_past_day_is_incomplete() {
        let r = compute_duration(day(), Some("09:00"), None, later());
        assert_eq!(r.hours, 0.0);
        assert!(r.incomplete);
        assert!(!r.still_working);
    }

    #[test]
    fn test_malformed_time_is_flagged() {
        let r = compute_duration(day(), Some("nine"), Some("17:00"), later());
        assert_eq!(r.hours, 0.0);
        assert!(r.invalid);
    }

    #[test]
    fn test_parse_time_formats() {
        let nine = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
        assert_eq!(parse_time_of_day("09:00").unwrap(), nine);
        assert_eq!(parse_time_of_day("09:00:00").unwrap(), nine);
        assert_eq!(parse_time_of_day("9:00 AM").unwrap(), nine);
        assert_eq!(parse_time_of_day("2024-03-05T09:00:00").unwrap(), nine);
        assert_eq!(parse_time_of_day("2024-03-05T09:00:00+06:00").unwrap(), nine);
        assert_eq!(
            parse_time_of_day("05:30 PM").unwrap(),
            NaiveTime::from_hms_opt(17, 30, 0).unwrap()
        );
        assert!(matches!(
            parse_time_of_day("25:99"),
            Err(DerivationError::MalformedTimeInput(_))
        ));
    }
}
