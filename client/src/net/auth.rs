//! Login, signup and password-reset calls.
//!
//! Each login flow ends the same way: build a `Session` from the backend's
//! answer, persist it to the tab store, and hand it back for the auth
//! context. Nothing is persisted unless the whole flow succeeds, and a
//! storage failure fails the flow.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use super::request::{ApiError, ApiRequest, Transport, send_json};
use super::types::{
    AdminLoginResponse, AdminSignup, Credentials, MessageResponse, Profile, TeacherLoginResponse, TokenResponse,
};
use crate::state::session::{Role, Session, SessionStore, persist};

pub const ADMIN_LOGIN: &str = "/api/admin/adminlogin";
pub const ADMIN_SIGNUP: &str = "/api/admin/signup";
pub const TEACHER_LOGIN: &str = "/api/teacher/login";
pub const TEACHER_GOOGLE_LOGIN: &str = "/api/teacher/google-login";
pub const STUDENT_LOGIN: &str = "/api/student/studentlogin";
pub const VERIFY: &str = "/api/auth/verify";
pub const PASSWORD_VERIFY_EMAIL: &str = "/api/teacher/password/verify-email";
pub const PASSWORD_CHANGE: &str = "/api/teacher/password/change-password";
/// Backend route that starts the Google OAuth redirect dance.
pub const GOOGLE_OAUTH_START: &str = "/api/auth/google";

pub fn google_oauth_start_url(role: Role) -> String {
    format!("{GOOGLE_OAUTH_START}?role={}", role.as_str())
}

/// A session needs both a token and the user id the role gate checks for.
pub(super) fn build_session(token: String, role: Role, user_id: String, name: String) -> Result<Session, ApiError> {
    if token.trim().is_empty() {
        return Err(ApiError::Decode("response carried no token".to_owned()));
    }
    if user_id.trim().is_empty() {
        return Err(ApiError::Decode(format!("response carried no {} id", role.as_str())));
    }
    let display_name = if name.trim().is_empty() { role.label().to_owned() } else { name };
    Ok(Session { token, role, user_id, display_name })
}

/// `POST /api/admin/adminlogin`.
///
/// # Errors
///
/// Propagates request failures; a response without a token is a decode error.
pub async fn admin_login<X, S>(transport: &X, store: &S, credentials: &Credentials) -> Result<Session, ApiError>
where
    X: Transport + ?Sized,
    S: SessionStore + ?Sized,
{
    let resp: AdminLoginResponse = send_json(transport, ApiRequest::post(ADMIN_LOGIN).json(credentials)?).await?;
    let session = build_session(resp.token, Role::Admin, resp.admin_id, resp.name)?;
    persist(store, &session)?;
    Ok(session)
}

/// `POST /api/admin/signup`. Returns the backend's confirmation message, if any.
///
/// # Errors
///
/// Propagates request failures.
pub async fn admin_signup<X: Transport + ?Sized>(transport: &X, signup: &AdminSignup) -> Result<Option<String>, ApiError> {
    let resp: Option<MessageResponse> = send_json(transport, ApiRequest::post(ADMIN_SIGNUP).json(signup)?).await?;
    Ok(resp.and_then(|r| r.message))
}

fn teacher_session(resp: TeacherLoginResponse) -> Result<Session, ApiError> {
    build_session(resp.token, Role::Teacher, resp.teacher.id, resp.teacher.name)
}

/// `POST /api/teacher/login`.
///
/// # Errors
///
/// Propagates request failures; a response without a token is a decode error.
pub async fn teacher_login<X, S>(transport: &X, store: &S, credentials: &Credentials) -> Result<Session, ApiError>
where
    X: Transport + ?Sized,
    S: SessionStore + ?Sized,
{
    let resp: TeacherLoginResponse = send_json(transport, ApiRequest::post(TEACHER_LOGIN).json(credentials)?).await?;
    let session = teacher_session(resp)?;
    persist(store, &session)?;
    Ok(session)
}

/// `POST /api/teacher/google-login` with a Google ID-token credential.
///
/// # Errors
///
/// Propagates request failures; a response without a token is a decode error.
pub async fn teacher_google_login<X, S>(transport: &X, store: &S, credential: &str) -> Result<Session, ApiError>
where
    X: Transport + ?Sized,
    S: SessionStore + ?Sized,
{
    let payload = serde_json::json!({ "credential": credential });
    let resp: TeacherLoginResponse =
        send_json(transport, ApiRequest::post(TEACHER_GOOGLE_LOGIN).json(&payload)?).await?;
    let session = teacher_session(resp)?;
    persist(store, &session)?;
    Ok(session)
}

/// `GET /api/auth/verify` with an explicit token.
///
/// # Errors
///
/// Propagates request failures.
pub async fn fetch_profile<X: Transport + ?Sized>(transport: &X, token: &str) -> Result<Profile, ApiError> {
    let profile: Profile = send_json(transport, profile_request(token)).await?;
    Ok(profile.flatten())
}

pub fn profile_request(token: &str) -> ApiRequest {
    ApiRequest::get(VERIFY).bearer(token)
}

/// `POST /api/student/studentlogin`, then `/api/auth/verify` for id and name.
///
/// # Errors
///
/// Fails if either call fails; the session is only persisted after both succeed.
pub async fn student_login<X, S>(transport: &X, store: &S, credentials: &Credentials) -> Result<Session, ApiError>
where
    X: Transport + ?Sized,
    S: SessionStore + ?Sized,
{
    let resp: TokenResponse = send_json(transport, ApiRequest::post(STUDENT_LOGIN).json(credentials)?).await?;
    if resp.token.trim().is_empty() {
        return Err(ApiError::Decode("response carried no token".to_owned()));
    }
    let profile = fetch_profile(transport, &resp.token).await?;
    let session = build_session(resp.token, Role::Student, profile.id, profile.name)?;
    persist(store, &session)?;
    Ok(session)
}

/// `POST /api/teacher/password/verify-email`; the backend mails a reset link.
///
/// # Errors
///
/// Propagates request failures.
pub async fn request_password_reset<X: Transport + ?Sized>(transport: &X, email: &str) -> Result<Option<String>, ApiError> {
    let payload = serde_json::json!({ "email": email });
    let resp: Option<MessageResponse> =
        send_json(transport, ApiRequest::post(PASSWORD_VERIFY_EMAIL).json(&payload)?).await?;
    Ok(resp.and_then(|r| r.message))
}

/// `POST /api/teacher/password/change-password` with the token from the reset link.
///
/// # Errors
///
/// Propagates request failures.
pub async fn change_password<X: Transport + ?Sized>(
    transport: &X,
    reset_token: &str,
    new_password: &str,
) -> Result<Option<String>, ApiError> {
    let payload = serde_json::json!({ "token": reset_token, "newPassword": new_password });
    let resp: Option<MessageResponse> = send_json(transport, ApiRequest::post(PASSWORD_CHANGE).json(&payload)?).await?;
    Ok(resp.and_then(|r| r.message))
}
