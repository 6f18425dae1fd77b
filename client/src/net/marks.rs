//! Teacher marks entry and student marks lookup.

#[cfg(test)]
#[path = "marks_test.rs"]
mod marks_test;

use super::request::{ApiError, ApiRequest, Transport, send_bytes, send_empty, send_json};
use super::types::{MarkRecord, MarksSubmission, Student, unwrap_list};
use crate::state::session::Session;

pub const CLASS_STUDENTS: &str = "/api/teachermarks/students";
pub const MARKS: &str = "/api/teachermarks/marks";
pub const SUBMIT_MARKS: &str = "/api/teachermarks/submit";
pub const EXPORT_PDF: &str = "/api/teachermarks/export/pdf";
pub const STUDENT_MARKS: &str = "/api/student/marks";

fn record_endpoint(id: &str) -> String {
    format!("/api/teachermarks/{}", urlencoding::encode(id))
}

/// Students the teacher may grade, optionally narrowed to a class.
///
/// # Errors
///
/// Propagates request failures.
pub async fn class_students<X: Transport + ?Sized>(
    transport: &X,
    session: &Session,
    class_name: &str,
) -> Result<Vec<Student>, ApiError> {
    let request = ApiRequest::get(CLASS_STUDENTS).authorized(session).query("className", class_name);
    let value: serde_json::Value = send_json(transport, request).await?;
    Ok(unwrap_list(value, "students"))
}

/// # Errors
///
/// Propagates request failures.
pub async fn list_marks<X: Transport + ?Sized>(
    transport: &X,
    session: &Session,
    subject: &str,
    exam: &str,
) -> Result<Vec<MarkRecord>, ApiError> {
    let request = ApiRequest::get(MARKS).authorized(session).query("subject", subject).query("exam", exam);
    let value: serde_json::Value = send_json(transport, request).await?;
    Ok(unwrap_list(value, "marks"))
}

/// # Errors
///
/// Propagates request failures.
pub async fn submit_marks<X: Transport + ?Sized>(
    transport: &X,
    session: &Session,
    submission: &MarksSubmission,
) -> Result<(), ApiError> {
    send_empty(transport, ApiRequest::post(SUBMIT_MARKS).authorized(session).json(submission)?).await
}

/// # Errors
///
/// Propagates request failures.
pub async fn delete_mark<X: Transport + ?Sized>(transport: &X, session: &Session, id: &str) -> Result<(), ApiError> {
    send_empty(transport, ApiRequest::delete(record_endpoint(id)).authorized(session)).await
}

/// Backend-rendered PDF of the filtered marks sheet.
///
/// # Errors
///
/// Propagates request failures.
pub async fn export_marks_pdf<X: Transport + ?Sized>(
    transport: &X,
    session: &Session,
    subject: &str,
    exam: &str,
) -> Result<Vec<u8>, ApiError> {
    let request = ApiRequest::get(EXPORT_PDF).authorized(session).query("subject", subject).query("exam", exam);
    send_bytes(transport, request).await
}

/// Marks for the signed-in student.
///
/// # Errors
///
/// Propagates request failures.
pub async fn my_marks<X: Transport + ?Sized>(transport: &X, session: &Session) -> Result<Vec<MarkRecord>, ApiError> {
    let value: serde_json::Value = send_json(transport, ApiRequest::get(STUDENT_MARKS).authorized(session)).await?;
    Ok(unwrap_list(value, "marks"))
}

/// Spreadsheet rows for a marks table: header plus one row per record.
pub fn marks_table(records: &[MarkRecord]) -> (Vec<String>, Vec<Vec<String>>) {
    let header = ["Roll No", "Student", "Subject", "Exam", "Total", "Out Of"].map(str::to_owned).to_vec();
    let rows = records
        .iter()
        .map(|r| {
            vec![
                r.roll_no.clone(),
                r.student_name.clone(),
                r.subject.clone(),
                r.exam.clone(),
                format_score(r.total),
                format_score(r.max_total),
            ]
        })
        .collect();
    (header, rows)
}

/// Render a score without a trailing `.0` for whole numbers.
pub fn format_score(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}").trim_end_matches('0').trim_end_matches('.').to_owned()
    }
}

/// Distinct non-empty subjects, in first-seen order.
pub fn subjects(records: &[MarkRecord]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for r in records {
        if !r.subject.is_empty() && !out.contains(&r.subject) {
            out.push(r.subject.clone());
        }
    }
    out
}
