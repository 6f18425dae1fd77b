//! Roll-call sheet for one schedule on one date.

#[cfg(test)]
#[path = "roll_call_test.rs"]
mod roll_call_test;

use crate::net::types::{AttendanceEntry, AttendanceRecord, AttendanceStatus, AttendanceSubmission, Student};

#[derive(Clone, Debug, PartialEq)]
pub struct RollCallEntry {
    pub student_id: String,
    pub name: String,
    pub roll_no: String,
    pub status: AttendanceStatus,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RollCall {
    pub schedule_id: String,
    pub date: String,
    pub entries: Vec<RollCallEntry>,
}

impl RollCall {
    /// Everyone starts present; the teacher marks absentees.
    pub fn new(schedule_id: &str, date: &str, students: &[Student]) -> Self {
        Self {
            schedule_id: schedule_id.to_owned(),
            date: date.to_owned(),
            entries: students
                .iter()
                .map(|s| RollCallEntry {
                    student_id: s.id.clone(),
                    name: s.name.clone(),
                    roll_no: s.roll_no.clone(),
                    status: AttendanceStatus::Present,
                })
                .collect(),
        }
    }

    pub fn toggle(&mut self, student_id: &str) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.student_id == student_id) {
            entry.status = entry.status.toggled();
        }
    }

    pub fn mark_all(&mut self, status: AttendanceStatus) {
        for entry in &mut self.entries {
            entry.status = status;
        }
    }

    /// Overlay statuses already recorded for this date.
    pub fn apply_records(&mut self, records: &[AttendanceRecord]) {
        for record in records {
            if let Some(entry) = self.entries.iter_mut().find(|e| e.student_id == record.student_id) {
                entry.status = record.status;
            }
        }
    }

    /// `(present, absent)` counts.
    pub fn counts(&self) -> (usize, usize) {
        let present = self.entries.iter().filter(|e| e.status == AttendanceStatus::Present).count();
        (present, self.entries.len() - present)
    }

    /// # Errors
    ///
    /// Returns a display message when the schedule, date or students are missing.
    pub fn submission(&self) -> Result<AttendanceSubmission, &'static str> {
        if self.schedule_id.trim().is_empty() {
            return Err("Select a schedule.");
        }
        if self.date.trim().is_empty() {
            return Err("Select a date.");
        }
        if self.entries.is_empty() {
            return Err("No students on this roll.");
        }
        Ok(AttendanceSubmission {
            schedule_id: self.schedule_id.clone(),
            date: self.date.clone(),
            entries: self
                .entries
                .iter()
                .map(|e| AttendanceEntry { student_id: e.student_id.clone(), status: e.status })
                .collect(),
        })
    }
}
