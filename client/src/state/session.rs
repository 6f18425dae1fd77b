//! Per-tab session credentials and the reactive auth context.
//!
//! SYSTEM CONTEXT
//! ==============
//! Login screens and the OAuth callback write a `Session` into the tab's
//! `sessionStorage`; route guards and data screens read it back. The
//! `AuthContext` mirrors the stored session into a signal provided once at
//! the app root, so components receive credentials through context instead
//! of poking at storage directly.
//!
//! STORAGE LAYOUT
//! ==============
//! Keys are flat strings (`token`, `role`, `adminId`, `teacherName`, ...) so
//! the layout stays compatible with sessions written by older builds of the
//! web client.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;

use leptos::prelude::*;
use serde::{Deserialize, Serialize};

pub const TOKEN_KEY: &str = "token";
pub const ROLE_KEY: &str = "role";

/// The three user roles served by the product.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Teacher,
    Student,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Teacher, Role::Student];

    /// Wire/storage spelling of the role.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Teacher => "teacher",
            Role::Student => "student",
        }
    }

    /// Parse a stored or query-string role, ignoring case and surrounding space.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Role::ALL.into_iter().find(|role| role.as_str().eq_ignore_ascii_case(raw))
    }

    pub fn label(self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Teacher => "Teacher",
            Role::Student => "Student",
        }
    }

    pub fn login_path(self) -> &'static str {
        match self {
            Role::Admin => "/adminlogin",
            Role::Teacher => "/teacherlogin",
            Role::Student => "/studentlogin",
        }
    }

    pub fn dashboard_path(self) -> &'static str {
        match self {
            Role::Admin => "/admindash",
            Role::Teacher => "/teacherdash",
            Role::Student => "/studentdash",
        }
    }

    /// Storage key holding this role's user identifier.
    pub fn id_key(self) -> &'static str {
        match self {
            Role::Admin => "adminId",
            Role::Teacher => "teacherId",
            Role::Student => "studentId",
        }
    }

    /// Storage key holding this role's display name.
    pub fn name_key(self) -> &'static str {
        match self {
            Role::Admin => "adminName",
            Role::Teacher => "teacherName",
            Role::Student => "studentName",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Credentials issued by the backend for the signed-in user.
///
/// Holding a token does not grant anything by itself; the backend decides
/// on every request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub role: Role,
    pub user_id: String,
    pub display_name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("session storage is not available")]
    Unavailable,

    /// The browser rejected a write (quota, private mode).
    #[error("could not write {key}: {reason}")]
    Write { key: String, reason: String },
}

/// Flat string key/value store backing the session.
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// In-process store used during SSR and in tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// The browser tab's `sessionStorage`. Every operation no-ops outside the browser.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserSessionStore;

#[cfg(feature = "hydrate")]
fn browser_storage() -> Result<web_sys::Storage, StoreError> {
    web_sys::window()
        .and_then(|w| w.session_storage().ok().flatten())
        .ok_or(StoreError::Unavailable)
}

#[cfg(feature = "hydrate")]
fn write_failed(key: &str, e: &wasm_bindgen::JsValue) -> StoreError {
    StoreError::Write { key: key.to_owned(), reason: format!("{e:?}") }
}

#[cfg(feature = "hydrate")]
impl SessionStore for BrowserSessionStore {
    fn get(&self, key: &str) -> Option<String> {
        browser_storage().ok()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        browser_storage()?.set_item(key, value).map_err(|e| write_failed(key, &e))
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        browser_storage()?.remove_item(key).map_err(|e| write_failed(key, &e))
    }
}

/// Server render: nothing is stored, so reads miss and writes fail.
#[cfg(not(feature = "hydrate"))]
impl SessionStore for BrowserSessionStore {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::Unavailable)
    }

    fn remove(&self, _key: &str) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Read a key, treating blank values as absent.
pub fn stored_value<S: SessionStore + ?Sized>(store: &S, key: &str) -> Option<String> {
    store.get(key).filter(|v| !v.trim().is_empty())
}

/// Write `session` to the store, dropping identifiers left by any other role.
///
/// # Errors
///
/// Returns the first failed write; the store may then hold a partial session.
pub fn persist<S: SessionStore + ?Sized>(store: &S, session: &Session) -> Result<(), StoreError> {
    clear(store)?;
    store.set(TOKEN_KEY, &session.token)?;
    store.set(ROLE_KEY, session.role.as_str())?;
    if !session.user_id.is_empty() {
        store.set(session.role.id_key(), &session.user_id)?;
    }
    if !session.display_name.is_empty() {
        store.set(session.role.name_key(), &session.display_name)?;
    }
    Ok(())
}

/// Rebuild the session from storage. Requires a token and a known role.
pub fn load<S: SessionStore + ?Sized>(store: &S) -> Option<Session> {
    let token = stored_value(store, TOKEN_KEY)?;
    let role = Role::parse(&stored_value(store, ROLE_KEY)?)?;
    Some(Session {
        token,
        role,
        user_id: stored_value(store, role.id_key()).unwrap_or_default(),
        display_name: stored_value(store, role.name_key()).unwrap_or_else(|| role.label().to_owned()),
    })
}

/// Remove every session key for every role.
///
/// # Errors
///
/// Every key is attempted; the first failure is returned.
pub fn clear<S: SessionStore + ?Sized>(store: &S) -> Result<(), StoreError> {
    let role_keys = Role::ALL.into_iter().flat_map(|role| [role.id_key(), role.name_key()]);
    [TOKEN_KEY, ROLE_KEY]
        .into_iter()
        .chain(role_keys)
        .map(|key| store.remove(key))
        .fold(Ok(()), Result::and)
}

/// Reactive view of the current session, provided via context at the app root.
#[derive(Clone, Copy, Debug)]
pub struct AuthContext {
    session: RwSignal<Option<Session>>,
    restored: RwSignal<bool>,
}

impl Default for AuthContext {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthContext {
    pub fn new() -> Self {
        Self { session: RwSignal::new(None), restored: RwSignal::new(false) }
    }

    /// Load the persisted session. Called once the app is running in the browser.
    pub fn restore<S: SessionStore + ?Sized>(&self, store: &S) {
        self.session.set(load(store));
        self.restored.set(true);
    }

    /// Publish a session that a login flow has already persisted.
    pub fn adopt(&self, session: Session) {
        self.session.set(Some(session));
        self.restored.set(true);
    }

    /// Clear storage and the signal. Returns the role that was signed in, if any.
    pub fn logout<S: SessionStore + ?Sized>(&self, store: &S) -> Option<Role> {
        let role = self
            .session
            .get_untracked()
            .map(|s| s.role)
            .or_else(|| stored_value(store, ROLE_KEY).and_then(|r| Role::parse(&r)));
        if let Err(e) = clear(store) {
            leptos::logging::warn!("logout left session keys behind: {e}");
        }
        self.session.set(None);
        role
    }

    /// Subscribe the running effect to session changes.
    pub fn track(&self) {
        self.session.track();
    }

    pub fn current(&self) -> Option<Session> {
        self.session.get()
    }

    pub fn current_untracked(&self) -> Option<Session> {
        self.session.get_untracked()
    }

    pub fn is_restored(&self) -> bool {
        self.restored.get()
    }

    /// Display name for the signed-in user, or the role label when none was stored.
    pub fn display_name(&self, role: Role) -> String {
        self.session
            .get()
            .filter(|s| s.role == role)
            .map_or_else(|| role.label().to_owned(), |s| s.display_name)
    }
}

/// Stores that misbehave the way a browser can.
#[cfg(test)]
pub(crate) mod testing {
    use super::{SessionStore, StoreError};

    /// Accepts removals but rejects every write, like an exhausted quota.
    pub struct FullStore;

    impl SessionStore for FullStore {
        fn get(&self, _key: &str) -> Option<String> {
            None
        }

        fn set(&self, key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Write { key: key.to_owned(), reason: "QuotaExceededError".to_owned() })
        }

        fn remove(&self, _key: &str) -> Result<(), StoreError> {
            Ok(())
        }
    }
}
