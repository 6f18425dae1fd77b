//! Google Classroom connection and assignment sync, proxied by the backend.
//!
//! The backend holds the Google tokens; this side only asks for status,
//! follows the consent URL, and triggers grade sync for one assignment.

#[cfg(test)]
#[path = "classroom_test.rs"]
mod classroom_test;

use super::request::{ApiError, ApiRequest, Transport, send_json};
use super::types::{Assignment, ClassroomStatus, ConnectUrl, Course, SyncResult, unwrap_list};
use crate::state::session::Session;

pub const STATUS: &str = "/api/auth/classroom/status";
pub const CONNECT: &str = "/api/auth/classroom/connect";
pub const COURSES: &str = "/api/classroom/courses";

fn assignments_endpoint(course_id: &str) -> String {
    format!("{COURSES}/{}/assignments", urlencoding::encode(course_id))
}

fn sync_endpoint(course_id: &str, assignment_id: &str) -> String {
    format!("{}/{}/sync", assignments_endpoint(course_id), urlencoding::encode(assignment_id))
}

/// # Errors
///
/// Propagates request failures.
pub async fn status<X: Transport + ?Sized>(transport: &X, session: &Session) -> Result<ClassroomStatus, ApiError> {
    let resp: Option<ClassroomStatus> = send_json(transport, ApiRequest::get(STATUS).authorized(session)).await?;
    Ok(resp.unwrap_or_default())
}

/// Google consent URL to send the browser to.
///
/// # Errors
///
/// Propagates request failures; an empty URL is a decode error.
pub async fn connect_url<X: Transport + ?Sized>(transport: &X, session: &Session) -> Result<String, ApiError> {
    let resp: ConnectUrl = send_json(transport, ApiRequest::get(CONNECT).authorized(session)).await?;
    if resp.url.trim().is_empty() {
        return Err(ApiError::Decode("connect response carried no url".to_owned()));
    }
    Ok(resp.url)
}

/// # Errors
///
/// Propagates request failures.
pub async fn courses<X: Transport + ?Sized>(transport: &X, session: &Session) -> Result<Vec<Course>, ApiError> {
    let value: serde_json::Value = send_json(transport, ApiRequest::get(COURSES).authorized(session)).await?;
    Ok(unwrap_list(value, "courses"))
}

/// # Errors
///
/// Propagates request failures.
pub async fn assignments<X: Transport + ?Sized>(
    transport: &X,
    session: &Session,
    course_id: &str,
) -> Result<Vec<Assignment>, ApiError> {
    let value: serde_json::Value =
        send_json(transport, ApiRequest::get(assignments_endpoint(course_id)).authorized(session)).await?;
    Ok(unwrap_list(value, "assignments"))
}

/// Pull Classroom grades for one assignment into Gradyze marks.
///
/// # Errors
///
/// Propagates request failures.
pub async fn sync_assignment<X: Transport + ?Sized>(
    transport: &X,
    session: &Session,
    course_id: &str,
    assignment_id: &str,
) -> Result<SyncResult, ApiError> {
    let request = ApiRequest::post(sync_endpoint(course_id, assignment_id)).authorized(session);
    let resp: Option<SyncResult> = send_json(transport, request).await?;
    Ok(resp.unwrap_or_default())
}

/// Confirmation line after a sync.
pub fn sync_summary(result: &SyncResult) -> String {
    result
        .message
        .clone()
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| format!("Synced {} grade(s)", result.synced))
}
