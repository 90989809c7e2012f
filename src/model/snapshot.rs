use serde::{Deserialize, Serialize};

use super::{AbsenceRecord, AttendanceRecord, HolidayRecord, LeaveRecord};

/// Records for a window, joined after every fetch has completed.
/// Aggregating a partial snapshot gives wrong LOP and worked-day counts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordSnapshot {
    #[serde(default)]
    pub attendance: Vec<AttendanceRecord>,
    #[serde(default)]
    pub leaves: Vec<LeaveRecord>,
    #[serde(default)]
    pub absences: Vec<AbsenceRecord>,
    #[serde(default)]
    pub holidays: Vec<HolidayRecord>,
}
