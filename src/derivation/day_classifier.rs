use std::collections::{HashMap, HashSet};

use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};
use tracing::debug;

use crate::derivation::time_interval::compute_duration;
use crate::error::DerivationError;
use crate::model::{
    AbsenceRecord, AttendanceRecord, DayClassification, DayStatus, HolidayRecord, LeaveRecord,
    RecordSnapshot,
};

/// One employee's records, indexed by date.
pub struct EmployeeRecords<'a> {
    attendance: HashMap<NaiveDate, &'a AttendanceRecord>,
    absences: HashMap<NaiveDate, &'a AbsenceRecord>,
    approved_leaves: Vec<&'a LeaveRecord>,
    holidays: HashMap<NaiveDate, &'a HolidayRecord>,
}

impl<'a> EmployeeRecords<'a> {
    /// Picks out `employee_id`'s records. Ids compare case-insensitively so
    /// that e-mail ids match regardless of how the backend cased them.
    pub fn build(employee_id: &'a str, snapshot: &'a RecordSnapshot) -> Self {
        let mut attendance: HashMap<NaiveDate, &AttendanceRecord> = HashMap::new();
        for record in snapshot
            .attendance
            .iter()
            .filter(|r| same_employee(&r.employee_id, employee_id))
        {
            if !record.is_consistent() {
                let e = DerivationError::InconsistentRecord {
                    employee_id: record.employee_id.clone(),
                    date: record.date,
                };
                debug!(error = %e, "Ignoring attendance record");
                continue;
            }
            match attendance.get(&record.date) {
                Some(existing) if completeness(existing) >= completeness(record) => {
                    debug!(date = %record.date, "Duplicate attendance record, keeping the first");
                }
                _ => {
                    attendance.insert(record.date, record);
                }
            }
        }

        let absences = snapshot
            .absences
            .iter()
            .filter(|r| same_employee(&r.employee_id, employee_id))
            .map(|r| (r.date, r))
            .collect();

        let approved_leaves = snapshot
            .leaves
            .iter()
            .filter(|l| same_employee(&l.employee_id, employee_id))
            .filter(|l| l.is_approved())
            .filter(|l| {
                let ok = l.is_well_formed();
                if !ok {
                    debug!(
                        start = %l.start_date,
                        end = %l.end_date,
                        "Ignoring leave ending before it starts"
                    );
                }
                ok
            })
            .collect();

        let holidays = snapshot.holidays.iter().map(|h| (h.date, h)).collect();

        Self {
            attendance,
            absences,
            approved_leaves,
            holidays,
        }
    }

    pub fn attendance_on(&self, date: NaiveDate) -> Option<&'a AttendanceRecord> {
        self.attendance.get(&date).copied()
    }

    pub fn absence_on(&self, date: NaiveDate) -> Option<&'a AbsenceRecord> {
        self.absences.get(&date).copied()
    }

    pub fn on_approved_leave(&self, date: NaiveDate) -> bool {
        self.approved_leaves.iter().any(|l| l.covers(date))
    }

    /// Dates in `from..=to` covered by any approved leave.
    pub fn approved_leave_dates(&self, from: NaiveDate, to: NaiveDate) -> HashSet<NaiveDate> {
        self.approved_leaves
            .iter()
            .flat_map(|l| l.dates_within(from, to))
            .collect()
    }

    pub fn holiday_on(&self, date: NaiveDate) -> Option<&'a HolidayRecord> {
        self.holidays.get(&date).copied()
    }
}

fn same_employee(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

fn completeness(record: &AttendanceRecord) -> u8 {
    u8::from(record.check_in().is_some()) + u8::from(record.check_out().is_some())
}

pub fn is_sunday(date: NaiveDate) -> bool {
    date.weekday() == Weekday::Sun
}

/// Assigns one status to `date`. First matching rule wins:
/// future, explicit absence, attendance, approved leave, no record.
///
/// Attendance beats leave, absence beats everything but future dating.
pub fn classify_day(
    date: NaiveDate,
    records: &EmployeeRecords<'_>,
    reference_now: NaiveDateTime,
) -> DayClassification {
    let today = reference_now.date();
    let mut day = classify_status(date, today, records, reference_now);
    day.holiday = records.holiday_on(date).map(|h| h.summary.clone());
    day
}

fn classify_status(
    date: NaiveDate,
    today: NaiveDate,
    records: &EmployeeRecords<'_>,
    reference_now: NaiveDateTime,
) -> DayClassification {
    if date > today {
        return DayClassification::new(date, DayStatus::Future);
    }

    if records.absence_on(date).is_some() {
        return DayClassification::new(date, DayStatus::Absent);
    }

    if let Some(record) = records.attendance_on(date).filter(|r| r.has_check_in()) {
        let duration = compute_duration(date, record.check_in(), record.check_out(), reference_now);

        let status = if duration.incomplete {
            DayStatus::Absent
        } else if is_sunday(date) {
            DayStatus::WorkingSunday
        } else {
            DayStatus::Present
        };

        return DayClassification {
            worked_hours: duration.hours,
            check_in: record.check_in.clone(),
            check_out: record.check_out.clone(),
            still_working: duration.still_working,
            incomplete: duration.incomplete,
            invalid: duration.invalid,
            ..DayClassification::new(date, status)
        };
    }

    if records.on_approved_leave(date) {
        return DayClassification::new(date, DayStatus::OnLeave);
    }

    DayClassification::new(date, DayStatus::NoRecord)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LeaveStatus;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn at(date: NaiveDate, h: u32, m: u32) -> NaiveDateTime {
        date.and_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_absence_overrides_approved_leave() {
        let snapshot = RecordSnapshot {
            absences: vec![AbsenceRecord::new("e1", d(2024, 3, 10))],
            leaves: vec![LeaveRecord::new(
                "e1",
                d(2024, 3, 8),
                d(2024, 3, 12),
                LeaveStatus::Approved,
            )],
            ..Default::default()
        };
        let records = EmployeeRecords::build("e1", &snapshot);

        let day = classify_day(d(2024, 3, 10), &records, at(d(2024, 4, 1), 9, 0));
        assert_eq!(day.status, DayStatus::Absent);

        let day = classify_day(d(2024, 3, 11), &records, at(d(2024, 4, 1), 9, 0));
        assert_eq!(day.status, DayStatus::OnLeave);
    }

    #[test]
    fn test_open_check_in_today_is_present_and_still_working() {
        let today = d(2024, 3, 13);
        let snapshot = RecordSnapshot {
            attendance: vec![AttendanceRecord::new("e1", today, Some("09:00"), None)],
            ..Default::default()
        };
        let records = EmployeeRecords::build("e1", &snapshot);

        let day = classify_day(today, &records, at(today, 11, 30));
        assert_eq!(day.status, DayStatus::Present);
        assert!(day.still_working);
        assert!((day.worked_hours - 2.5).abs() < 0.01);
        assert_eq!(day.display_label(), "Working");
    }

    #[test]
    fn test_open_check_in_on_past_day_is_absent_but_pending() {
        let date = d(2024, 3, 12);
        let snapshot = RecordSnapshot {
            attendance: vec![AttendanceRecord::new("e1", date, Some("09:00"), None)],
            ..Default::default()
        };
        let records = EmployeeRecords::build("e1", &snapshot);

        let day = classify_day(date, &records, at(d(2024, 3, 13), 10, 0));
        assert_eq!(day.status, DayStatus::Absent);
        assert!(day.incomplete);
        assert!(!day.still_working);
        assert_eq!(day.worked_hours, 0.0);
        assert_eq!(day.display_label(), "Pending");
    }

    #[test]
    fn test_attendance_beats_leave() {
        let date = d(2024, 3, 12);
        let snapshot = RecordSnapshot {
            attendance: vec![AttendanceRecord::new("e1", date, Some("09:00"), Some("13:00"))],
            leaves: vec![LeaveRecord::new("e1", date, date, LeaveStatus::Approved)],
            ..Default::default()
        };
        let records = EmployeeRecords::build("e1", &snapshot);

        let day = classify_day(date, &records, at(d(2024, 4, 1), 0, 0));
        assert_eq!(day.status, DayStatus::Present);
        assert_eq!(day.worked_hours, 4.0);
    }

    #[test]
    fn test_future_wins_over_everything() {
        let date = d(2024, 3, 20);
        let snapshot = RecordSnapshot {
            absences: vec![AbsenceRecord::new("e1", date)],
            ..Default::default()
        };
        let records = EmployeeRecords::build("e1", &snapshot);

        let day = classify_day(date, &records, at(d(2024, 3, 19), 18, 0));
        assert_eq!(day.status, DayStatus::Future);
    }

    #[test]
    fn test_sundays_and_empty_days() {
        let sunday = d(2024, 3, 17);
        let monday = d(2024, 3, 18);
        let snapshot = RecordSnapshot {
            attendance: vec![AttendanceRecord::new("e1", sunday, Some("10:00"), Some("14:00"))],
            ..Default::default()
        };
        let records = EmployeeRecords::build("e1", &snapshot);
        let now = at(d(2024, 4, 1), 0, 0);

        let day = classify_day(sunday, &records, now);
        assert_eq!(day.status, DayStatus::WorkingSunday);
        assert_eq!(day.worked_hours, 4.0);

        assert_eq!(classify_day(d(2024, 3, 10), &records, now).status, DayStatus::NoRecord);
        assert_eq!(classify_day(monday, &records, now).status, DayStatus::NoRecord);
    }

    #[test]
    fn test_pending_and_rejected_leave_do_not_cover() {
        let date = d(2024, 3, 12);
        let snapshot = RecordSnapshot {
            leaves: vec![
                LeaveRecord::new("e1", date, date, LeaveStatus::Pending),
                LeaveRecord::new("e1", date, date, LeaveStatus::Rejected),
            ],
            ..Default::default()
        };
        let records = EmployeeRecords::build("e1", &snapshot);
        let day = classify_day(date, &records, at(d(2024, 4, 1), 0, 0));
        assert_eq!(day.status, DayStatus::NoRecord);
    }

    #[test]
    fn test_checkout_without_checkin_is_ignored() {
        let date = d(2024, 3, 12);
        let snapshot = RecordSnapshot {
            attendance: vec![AttendanceRecord::new("e1", date, None, Some("17:00"))],
            leaves: vec![LeaveRecord::new("e1", date, date, LeaveStatus::Approved)],
            ..Default::default()
        };
        let records = EmployeeRecords::build("e1", &snapshot);
        assert!(records.attendance_on(date).is_none());

        let day = classify_day(date, &records, at(d(2024, 4, 1), 0, 0));
        assert_eq!(day.status, DayStatus::OnLeave);
    }

    #[test]
    fn test_malformed_times_still_present_with_zero_hours() {
        let date = d(2024, 3, 12);
        let snapshot = RecordSnapshot {
            attendance: vec![AttendanceRecord::new("e1", date, Some("09:00"), Some("later"))],
            ..Default::default()
        };
        let records = EmployeeRecords::build("e1", &snapshot);
        let day = classify_day(date, &records, at(d(2024, 4, 1), 0, 0));
        assert_eq!(day.status, DayStatus::Present);
        assert!(day.invalid);
        assert_eq!(day.worked_hours, 0.0);
    }

    #[test]
    fn test_other_employees_and_holidays() {
        let date = d(2024, 3, 26);
        let snapshot = RecordSnapshot {
            attendance: vec![AttendanceRecord::new(
                "bob@co.com",
                date,
                Some("09:00"),
                Some("17:00"),
            )],
            holidays: vec![HolidayRecord {
                date,
                summary: "Independence Day".to_string(),
                holiday_type: Some("government".to_string()),
            }],
            ..Default::default()
        };
        let records = EmployeeRecords::build("Alice@Co.com", &snapshot);
        let day = classify_day(date, &records, at(d(2024, 4, 1), 0, 0));
        assert_eq!(day.status, DayStatus::NoRecord);
        assert_eq!(day.holiday.as_deref(), Some("Independence Day"));

        let bob = EmployeeRecords::build("BOB@co.com", &snapshot);
        assert_eq!(classify_day(date, &bob, at(d(2024, 4, 1), 0, 0)).status, DayStatus::Present);
    }

    #[test]
    fn test_duplicate_attendance_keeps_most_complete_row() {
        let date = d(2024, 3, 12);
        let snapshot = RecordSnapshot {
            attendance: vec![
                AttendanceRecord::new("e1", date, Some("08:00"), None),
                AttendanceRecord::new("e1", date, Some("09:00"), Some("17:30")),
                AttendanceRecord::new("e1", date, Some("10:00"), Some("12:00")),
            ],
            ..Default::default()
        };
        let records = EmployeeRecords::build("e1", &snapshot);
        let kept = records.attendance_on(date).unwrap();
        assert_eq!(kept.check_in(), Some("09:00"));

        let day = classify_day(date, &records, at(d(2024, 4, 1), 0, 0));
        assert_eq!(day.status, DayStatus::Present);
        assert!(!day.incomplete);
        assert_eq!(day.worked_hours, 8.5);
    }

    #[test]
    fn test_approved_leave_dates_are_clipped_to_the_range() {
        let snapshot = RecordSnapshot {
            leaves: vec![
                LeaveRecord::new("e1", d(2024, 2, 28), d(2024, 3, 2), LeaveStatus::Approved),
                LeaveRecord::new("e1", d(2024, 3, 1), d(2024, 3, 1), LeaveStatus::Approved),
                LeaveRecord::new("e1", d(2024, 3, 5), d(2024, 3, 5), LeaveStatus::Pending),
            ],
            ..Default::default()
        };
        let records = EmployeeRecords::build("e1", &snapshot);
        let dates = records.approved_leave_dates(d(2024, 3, 1), d(2024, 3, 31));
        assert_eq!(dates, HashSet::from([d(2024, 3, 1), d(2024, 3, 2)]));
    }
}
