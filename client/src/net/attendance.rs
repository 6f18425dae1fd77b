//! Class schedules and roll-call attendance.

#[cfg(test)]
#[path = "attendance_test.rs"]
mod attendance_test;

use super::request::{ApiError, ApiRequest, Transport, send_empty, send_json};
use super::types::{AttendanceRecord, AttendanceStatus, AttendanceSubmission, Schedule, ScheduleInput, unwrap_list};
use crate::state::session::Session;

pub const SCHEDULES: &str = "/api/schedules";
pub const ATTENDANCE: &str = "/api/attendance";
pub const MARK_ATTENDANCE: &str = "/api/attendance/mark";
pub const STUDENT_ATTENDANCE: &str = "/api/attendance/student";

fn schedule_endpoint(id: &str) -> String {
    format!("{SCHEDULES}/{}", urlencoding::encode(id))
}

fn record_endpoint(id: &str) -> String {
    format!("{ATTENDANCE}/{}", urlencoding::encode(id))
}

/// # Errors
///
/// Propagates request failures.
pub async fn list_schedules<X: Transport + ?Sized>(transport: &X, session: &Session) -> Result<Vec<Schedule>, ApiError> {
    let value: serde_json::Value = send_json(transport, ApiRequest::get(SCHEDULES).authorized(session)).await?;
    Ok(unwrap_list(value, "schedules"))
}

/// # Errors
///
/// Propagates request failures.
pub async fn create_schedule<X: Transport + ?Sized>(
    transport: &X,
    session: &Session,
    input: &ScheduleInput,
) -> Result<(), ApiError> {
    send_empty(transport, ApiRequest::post(SCHEDULES).authorized(session).json(input)?).await
}

/// # Errors
///
/// Propagates request failures.
pub async fn delete_schedule<X: Transport + ?Sized>(transport: &X, session: &Session, id: &str) -> Result<(), ApiError> {
    send_empty(transport, ApiRequest::delete(schedule_endpoint(id)).authorized(session)).await
}

/// Attendance already recorded for a schedule on a date.
///
/// # Errors
///
/// Propagates request failures.
pub async fn list_attendance<X: Transport + ?Sized>(
    transport: &X,
    session: &Session,
    schedule_id: &str,
    date: &str,
) -> Result<Vec<AttendanceRecord>, ApiError> {
    let request = ApiRequest::get(ATTENDANCE)
        .authorized(session)
        .query("scheduleId", schedule_id)
        .query("date", date);
    let value: serde_json::Value = send_json(transport, request).await?;
    Ok(unwrap_list(value, "attendance"))
}

/// # Errors
///
/// Propagates request failures.
pub async fn mark_attendance<X: Transport + ?Sized>(
    transport: &X,
    session: &Session,
    submission: &AttendanceSubmission,
) -> Result<(), ApiError> {
    send_empty(transport, ApiRequest::post(MARK_ATTENDANCE).authorized(session).json(submission)?).await
}

/// # Errors
///
/// Propagates request failures.
pub async fn delete_attendance<X: Transport + ?Sized>(transport: &X, session: &Session, id: &str) -> Result<(), ApiError> {
    send_empty(transport, ApiRequest::delete(record_endpoint(id)).authorized(session)).await
}

/// Attendance history for the signed-in student.
///
/// # Errors
///
/// Propagates request failures.
pub async fn my_attendance<X: Transport + ?Sized>(
    transport: &X,
    session: &Session,
) -> Result<Vec<AttendanceRecord>, ApiError> {
    let value: serde_json::Value = send_json(transport, ApiRequest::get(STUDENT_ATTENDANCE).authorized(session)).await?;
    Ok(unwrap_list(value, "attendance"))
}

/// Present/total counts for a student's history.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AttendanceSummary {
    pub present: usize,
    pub total: usize,
}

impl AttendanceSummary {
    pub fn from_records(records: &[AttendanceRecord]) -> Self {
        let present = records.iter().filter(|r| r.status == AttendanceStatus::Present).count();
        Self { present, total: records.len() }
    }

    /// Whole-number percentage; `None` before any class is recorded.
    pub fn percentage(self) -> Option<u32> {
        if self.total == 0 {
            return None;
        }
        let pct = (self.present * 100 + self.total / 2) / self.total;
        u32::try_from(pct).ok()
    }
}

/// Spreadsheet rows for an attendance listing.
pub fn attendance_table(records: &[AttendanceRecord]) -> (Vec<String>, Vec<Vec<String>>) {
    let header = ["Date", "Student", "Subject", "Status"].map(str::to_owned).to_vec();
    let rows = records
        .iter()
        .map(|r| vec![r.date.clone(), r.student_name.clone(), r.subject.clone(), r.status.label().to_owned()])
        .collect();
    (header, rows)
}
