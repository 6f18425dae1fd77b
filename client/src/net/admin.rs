//! Admin-scoped calls: settings, marks overview and teacher accounts.

#[cfg(test)]
#[path = "admin_test.rs"]
mod admin_test;

use super::request::{ApiError, ApiRequest, Transport, send_empty, send_json};
use super::types::{AdminNameResponse, MarkRecord, Teacher, TeacherInput, unwrap_list};
use crate::state::session::Session;

pub const ADMIN_NAME: &str = "/api/adminsetting/admin-name";
pub const FETCH_MARKS: &str = "/api/admin/fetchmarks";
pub const TEACHERS: &str = "/api/admin/teachers";
pub const ADD_TEACHER: &str = "/api/admin/addteacher";

pub const DEFAULT_ADMIN_NAME: &str = "Admin";

fn teacher_endpoint(teacher_id: &str) -> String {
    format!("/api/admin/teacher/{}", urlencoding::encode(teacher_id))
}

/// Name to greet the admin with; `"Admin"` when the backend has none.
pub fn display_admin_name(resp: &AdminNameResponse) -> String {
    resp.admin_name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(DEFAULT_ADMIN_NAME)
        .to_owned()
}

/// `GET /api/adminsetting/admin-name`.
///
/// # Errors
///
/// Propagates request failures.
pub async fn fetch_admin_name<X: Transport + ?Sized>(transport: &X, session: &Session) -> Result<String, ApiError> {
    let resp: Option<AdminNameResponse> = send_json(transport, ApiRequest::get(ADMIN_NAME).authorized(session)).await?;
    Ok(display_admin_name(&resp.unwrap_or_default()))
}

/// `GET /api/admin/fetchmarks`: every marks record across the institution.
///
/// # Errors
///
/// Propagates request failures.
pub async fn fetch_marks_overview<X: Transport + ?Sized>(
    transport: &X,
    session: &Session,
) -> Result<Vec<MarkRecord>, ApiError> {
    let value: serde_json::Value = send_json(transport, ApiRequest::get(FETCH_MARKS).authorized(session)).await?;
    Ok(unwrap_list(value, "marks"))
}

/// # Errors
///
/// Propagates request failures.
pub async fn list_teachers<X: Transport + ?Sized>(transport: &X, session: &Session) -> Result<Vec<Teacher>, ApiError> {
    let value: serde_json::Value = send_json(transport, ApiRequest::get(TEACHERS).authorized(session)).await?;
    Ok(unwrap_list(value, "teachers"))
}

/// # Errors
///
/// Propagates request failures.
pub async fn add_teacher<X: Transport + ?Sized>(
    transport: &X,
    session: &Session,
    input: &TeacherInput,
) -> Result<(), ApiError> {
    send_empty(transport, ApiRequest::post(ADD_TEACHER).authorized(session).json(input)?).await
}

/// # Errors
///
/// Propagates request failures.
pub async fn remove_teacher<X: Transport + ?Sized>(
    transport: &X,
    session: &Session,
    teacher_id: &str,
) -> Result<(), ApiError> {
    send_empty(transport, ApiRequest::delete(teacher_endpoint(teacher_id)).authorized(session)).await
}
