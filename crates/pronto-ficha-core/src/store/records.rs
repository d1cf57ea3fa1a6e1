//! Attendance record collection operations.

use super::{keys, Store, StoreResult};
use crate::models::AttendanceRecord;

impl Store {
    /// The full attendance record list, newest first. Absent key reads as an
    /// empty list.
    pub fn attendance_records(&self) -> StoreResult<Vec<AttendanceRecord>> {
        Ok(self.load(keys::ATTENDANCE_RECORDS)?.unwrap_or_default())
    }

    /// Overwrite the attendance record list.
    pub fn save_attendance_records(&self, records: &[AttendanceRecord]) -> StoreResult<()> {
        self.save(keys::ATTENDANCE_RECORDS, &records)
    }
}
