//! Google OAuth hand-off after an external redirect.
//!
//! SYSTEM CONTEXT
//! ==============
//! The backend finishes the Google dance and redirects the browser to a
//! login screen with `?token=..&role=..` (or `?credential=..` when it
//! forwards a raw Google ID token); `/auth/callback` forwards the same query
//! to the matching login screen. The login screen turns that into a stored
//! session with one follow-up request, then navigates to the dashboard, or
//! stays put and shows `AUTH_FAILED`. Without parameters nothing happens.

#[cfg(test)]
#[path = "oauth_test.rs"]
mod oauth_test;

use super::auth::{build_session, fetch_profile, teacher_google_login};
use super::request::{ApiError, Transport};
use crate::state::session::{ROLE_KEY, Role, Session, SessionStore, TOKEN_KEY, clear, persist};

/// Shown for every hand-off failure; backend detail goes to the console only.
pub const AUTH_FAILED: &str = "Authentication failed. Please sign in again.";

/// Parameters recognized on the callback URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Handoff {
    Token { token: String, role: Option<Role> },
    Credential(String),
}

impl Handoff {
    /// Role whose login screen owns this hand-off. Teacher when unknown.
    pub fn role(&self) -> Role {
        match self {
            Handoff::Token { role: Some(role), .. } => *role,
            Handoff::Token { role: None, .. } | Handoff::Credential(_) => Role::Teacher,
        }
    }

    /// The same hand-off addressed to its login screen.
    pub fn login_url(&self) -> String {
        let login = self.role().login_path();
        match self {
            Handoff::Token { token, role: Some(role) } => {
                format!("{login}?token={}&role={}", urlencoding::encode(token), role.as_str())
            }
            Handoff::Token { token, role: None } => format!("{login}?token={}", urlencoding::encode(token)),
            Handoff::Credential(credential) => format!("{login}?credential={}", urlencoding::encode(credential)),
        }
    }
}

/// Read the callback query. `token` wins over `credential`; blanks are ignored.
pub fn parse_handoff(token: Option<&str>, role: Option<&str>, credential: Option<&str>) -> Option<Handoff> {
    let non_blank = |v: Option<&str>| v.map(str::trim).filter(|v| !v.is_empty()).map(str::to_owned);
    if let Some(token) = non_blank(token) {
        return Some(Handoff::Token { token, role: role.and_then(Role::parse) });
    }
    non_blank(credential).map(Handoff::Credential)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HandoffOutcome {
    /// No hand-off parameters present.
    NotApplicable,
    /// Session stored; go to the role's dashboard.
    SignedIn(Session),
    /// Hand-off failed; stay on `login_path` and show `message`.
    Failed { login_path: &'static str, message: &'static str },
}

/// Persist the hand-off token, confirm it with one profile request, and
/// store the returned identifiers.
async fn adopt_token<X, S>(transport: &X, store: &S, token: String, role: Option<Role>) -> Result<Session, ApiError>
where
    X: Transport + ?Sized,
    S: SessionStore + ?Sized,
{
    clear(store)?;
    store.set(TOKEN_KEY, &token)?;
    if let Some(role) = role {
        store.set(ROLE_KEY, role.as_str())?;
    }
    let profile = fetch_profile(transport, &token).await?;
    let role = role
        .or_else(|| profile.role.as_deref().and_then(Role::parse))
        .unwrap_or(Role::Teacher);
    let session = build_session(token, role, profile.id, profile.name)?;
    persist(store, &session)?;
    Ok(session)
}

/// Finish a hand-off. Any failure leaves the store empty.
pub async fn complete_handoff<X, S>(transport: &X, store: &S, handoff: Option<Handoff>) -> HandoffOutcome
where
    X: Transport + ?Sized,
    S: SessionStore + ?Sized,
{
    let Some(handoff) = handoff else {
        return HandoffOutcome::NotApplicable;
    };
    let login_path = handoff.role().login_path();
    let result = match handoff {
        Handoff::Credential(credential) => teacher_google_login(transport, store, &credential).await,
        Handoff::Token { token, role } => adopt_token(transport, store, token, role).await,
    };
    match result {
        Ok(session) => HandoffOutcome::SignedIn(session),
        Err(e) => {
            leptos::logging::warn!("sign-in hand-off failed: {e}");
            if let Err(e) = clear(store) {
                leptos::logging::warn!("hand-off left session keys behind: {e}");
            }
            HandoffOutcome::Failed { login_path, message: AUTH_FAILED }
        }
    }
}

/// Outcome of returning from the Google Classroom consent screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClassroomReturn {
    Connected,
    Error,
}

/// Read `?classroom=connected|error` from the classroom page URL.
pub fn parse_classroom_return(raw: Option<&str>) -> Option<ClassroomReturn> {
    match raw.map(str::trim) {
        Some("connected" | "success") => Some(ClassroomReturn::Connected),
        Some("error" | "denied") => Some(ClassroomReturn::Error),
        _ => None,
    }
}
