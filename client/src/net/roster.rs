//! Student roster management (`/api/studentmanagement/*`).

#[cfg(test)]
#[path = "roster_test.rs"]
mod roster_test;

use super::request::{ApiError, ApiRequest, FilePart, FormField, Transport, send_bytes, send_empty, send_json};
use super::types::{ImportSummary, Student, StudentInput, unwrap_list};
use crate::state::session::Session;

pub const STUDENTS: &str = "/api/studentmanagement/students";
pub const ADD_STUDENT: &str = "/api/studentmanagement/add";
pub const IMPORT_STUDENTS: &str = "/api/studentmanagement/import";

fn update_endpoint(id: &str) -> String {
    format!("/api/studentmanagement/update/{}", urlencoding::encode(id))
}

fn delete_endpoint(id: &str) -> String {
    format!("/api/studentmanagement/delete/{}", urlencoding::encode(id))
}

fn report_endpoint(id: &str) -> String {
    format!("/api/studentmanagement/report/{}/pdf", urlencoding::encode(id))
}

/// Case-insensitive match on name, roll number, email or class.
pub fn matches_search(student: &Student, needle: &str) -> bool {
    let needle = needle.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    [&student.name, &student.roll_no, &student.email, &student.class_name]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Accept only spreadsheet uploads the backend importer understands.
pub fn is_spreadsheet(file_name: &str) -> bool {
    let lower = file_name.to_lowercase();
    [".xlsx", ".xls", ".csv"].iter().any(|ext| lower.ends_with(ext))
}

/// # Errors
///
/// Propagates request failures.
pub async fn list_students<X: Transport + ?Sized>(transport: &X, session: &Session) -> Result<Vec<Student>, ApiError> {
    let value: serde_json::Value = send_json(transport, ApiRequest::get(STUDENTS).authorized(session)).await?;
    Ok(unwrap_list(value, "students"))
}

/// # Errors
///
/// Propagates request failures.
pub async fn add_student<X: Transport + ?Sized>(
    transport: &X,
    session: &Session,
    input: &StudentInput,
) -> Result<(), ApiError> {
    send_empty(transport, ApiRequest::post(ADD_STUDENT).authorized(session).json(input)?).await
}

/// # Errors
///
/// Propagates request failures.
pub async fn update_student<X: Transport + ?Sized>(
    transport: &X,
    session: &Session,
    id: &str,
    input: &StudentInput,
) -> Result<(), ApiError> {
    send_empty(transport, ApiRequest::put(update_endpoint(id)).authorized(session).json(input)?).await
}

/// # Errors
///
/// Propagates request failures.
pub async fn delete_student<X: Transport + ?Sized>(transport: &X, session: &Session, id: &str) -> Result<(), ApiError> {
    send_empty(transport, ApiRequest::delete(delete_endpoint(id)).authorized(session)).await
}

/// Upload an Excel roster as multipart field `file`.
///
/// # Errors
///
/// Propagates request failures.
pub async fn import_students<X: Transport + ?Sized>(
    transport: &X,
    session: &Session,
    file: FilePart,
) -> Result<ImportSummary, ApiError> {
    let request = ApiRequest::post(IMPORT_STUDENTS)
        .authorized(session)
        .multipart(vec![("file".to_owned(), FormField::File(file))]);
    let summary: Option<ImportSummary> = send_json(transport, request).await?;
    Ok(summary.unwrap_or_default())
}

/// Backend-rendered PDF report for one student.
///
/// # Errors
///
/// Propagates request failures.
pub async fn student_report_pdf<X: Transport + ?Sized>(
    transport: &X,
    session: &Session,
    id: &str,
) -> Result<Vec<u8>, ApiError> {
    send_bytes(transport, ApiRequest::get(report_endpoint(id)).authorized(session)).await
}
