use std::str::FromStr;

use chrono::{DateTime, NaiveDate};
use serde_json::{Map, Value};
use tracing::debug;

use crate::model::{
    AbsenceRecord, AttendanceRecord, HolidayRecord, LeaveRecord, LeaveStatus, RecordSnapshot,
};

/// ===============================
/// Field name variants seen in backend payloads
/// ===============================
const EMPLOYEE_KEYS: &[&str] = &[
    "employee_email",
    "employeeEmail",
    "email",
    "employee_id",
    "employeeId",
    "emp_id",
];
const DATE_KEYS: &[&str] = &["date", "attendance_date", "attendanceDate", "absence_date", "absenceDate"];
const CHECK_IN_KEYS: &[&str] = &["check_in", "checkIn", "clock_in", "clockIn"];
const CHECK_OUT_KEYS: &[&str] = &["check_out", "checkOut", "clock_out", "clockOut"];
const START_KEYS: &[&str] = &["start_date", "startDate", "from_date", "fromDate", "from"];
const END_KEYS: &[&str] = &["end_date", "endDate", "to_date", "toDate", "to"];
const STATUS_KEYS: &[&str] = &["status", "leave_status", "leaveStatus"];
const LEAVE_TYPE_KEYS: &[&str] = &["leave_type", "leaveType", "type"];
const SUMMARY_KEYS: &[&str] = &["summary", "name", "title", "localName"];
const HOLIDAY_TYPE_KEYS: &[&str] = &["holiday_type", "holidayType", "type"];
const ENVELOPE_KEYS: &[&str] = &["records", "data", "items"];

/// Typed records adapted from one JSON collection, plus how many elements
/// had to be dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized<T> {
    pub records: Vec<T>,
    pub skipped: usize,
}

/// A record type that can be built from a loosely shaped JSON object.
pub trait FromLooseJson: Sized {
    const KIND: &'static str;

    fn from_object(obj: &Map<String, Value>) -> Option<Self>;
}

/// Accepts a bare array, a `{records|data|items: [...]}` envelope, or null.
pub fn normalize<T: FromLooseJson>(value: &Value) -> Normalized<T> {
    let items: &[Value] = match value {
        Value::Null => &[],
        Value::Array(items) => items.as_slice(),
        Value::Object(obj) => match ENVELOPE_KEYS.iter().find_map(|k| obj.get(*k)) {
            Some(Value::Array(items)) => items.as_slice(),
            _ => std::slice::from_ref(value),
        },
        _ => std::slice::from_ref(value),
    };

    let mut records = Vec::with_capacity(items.len());
    let mut skipped = 0;
    for item in items {
        match item.as_object().and_then(T::from_object) {
            Some(record) => records.push(record),
            None => {
                skipped += 1;
                debug!(kind = T::KIND, record = %item, "Skipping record that could not be adapted");
            }
        }
    }

    Normalized { records, skipped }
}

/// Adapts all four collections at once. Returns the snapshot and the total
/// number of skipped elements.
pub fn snapshot_from_json(
    attendance: &Value,
    leaves: &Value,
    absences: &Value,
    holidays: &Value,
) -> (RecordSnapshot, usize) {
    let attendance = normalize::<AttendanceRecord>(attendance);
    let leaves = normalize::<LeaveRecord>(leaves);
    let absences = normalize::<AbsenceRecord>(absences);
    let holidays = normalize::<HolidayRecord>(holidays);

    let skipped = attendance.skipped + leaves.skipped + absences.skipped + holidays.skipped;
    let snapshot = RecordSnapshot {
        attendance: attendance.records,
        leaves: leaves.records,
        absences: absences.records,
        holidays: holidays.records,
    };
    (snapshot, skipped)
}

impl FromLooseJson for AttendanceRecord {
    const KIND: &'static str = "attendance";

    fn from_object(obj: &Map<String, Value>) -> Option<Self> {
        let employee_id = text_field(obj, EMPLOYEE_KEYS)?;
        let date = date_field(obj, DATE_KEYS)?;
        Some(AttendanceRecord {
            employee_id,
            date,
            check_in: text_field(obj, CHECK_IN_KEYS),
            check_out: text_field(obj, CHECK_OUT_KEYS),
        })
    }
}

impl FromLooseJson for LeaveRecord {
    const KIND: &'static str = "leave";

    fn from_object(obj: &Map<String, Value>) -> Option<Self> {
        let employee_id = text_field(obj, EMPLOYEE_KEYS)?;
        let start_date = date_field(obj, START_KEYS)?;
        let end_date = match field(obj, END_KEYS) {
            Some(v) => parse_date(v)?,
            None => start_date,
        };
        if start_date > end_date {
            return None;
        }
        let status = match text_field(obj, STATUS_KEYS) {
            Some(s) => LeaveStatus::from_str(&s).ok()?,
            None => LeaveStatus::Pending,
        };

        Some(LeaveRecord {
            employee_id,
            start_date,
            end_date,
            status,
            leave_type: text_field(obj, LEAVE_TYPE_KEYS),
            reason: text_field(obj, &["reason"]),
        })
    }
}

impl FromLooseJson for AbsenceRecord {
    const KIND: &'static str = "absence";

    fn from_object(obj: &Map<String, Value>) -> Option<Self> {
        Some(AbsenceRecord {
            employee_id: text_field(obj, EMPLOYEE_KEYS)?,
            date: date_field(obj, DATE_KEYS)?,
            reason: text_field(obj, &["reason"]),
        })
    }
}

impl FromLooseJson for HolidayRecord {
    const KIND: &'static str = "holiday";

    fn from_object(obj: &Map<String, Value>) -> Option<Self> {
        // calendar feeds nest the day as {"start": {"date": "..."}}
        let date = date_field(obj, DATE_KEYS).or_else(|| {
            obj.get("start")
                .and_then(Value::as_object)
                .and_then(|start| date_field(start, &["date", "dateTime"]))
        })?;

        Some(HolidayRecord {
            date,
            summary: text_field(obj, SUMMARY_KEYS).unwrap_or_else(|| "Holiday".to_string()),
            holiday_type: text_field(obj, HOLIDAY_TYPE_KEYS),
        })
    }
}

fn field<'v>(obj: &'v Map<String, Value>, keys: &[&str]) -> Option<&'v Value> {
    keys.iter()
        .filter_map(|k| obj.get(*k))
        .find(|v| !v.is_null())
}

/// Strings are trimmed, numbers stringified, blanks treated as missing.
fn text_field(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|k| obj.get(*k))
        .find_map(|v| match v {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
}

fn date_field(obj: &Map<String, Value>, keys: &[&str]) -> Option<NaiveDate> {
    field(obj, keys).and_then(parse_date)
}

/// `YYYY-MM-DD`, or any timestamp starting with one.
fn parse_date(value: &Value) -> Option<NaiveDate> {
    let s = value.as_str()?.trim();
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    s.get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
}
