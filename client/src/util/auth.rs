//! Role gate shared by every protected route.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each dashboard belongs to exactly one role. Route components apply the
//! same decision: a tab that holds no token, or no stored id for the route's
//! role, is sent to that role's login screen.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::state::session::{AuthContext, Role, SessionStore, TOKEN_KEY, stored_value};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gate {
    Render,
    Redirect(&'static str),
}

/// Decide whether a route owned by `role` may render.
pub fn gate<S: SessionStore + ?Sized>(role: Role, store: &S) -> Gate {
    let has_token = stored_value(store, TOKEN_KEY).is_some();
    let has_id = stored_value(store, role.id_key()).is_some();
    if has_token && has_id { Gate::Render } else { Gate::Redirect(role.login_path()) }
}

/// Re-run the gate whenever the restored session changes and redirect when it fails.
///
/// Returns a signal that is `true` only while the gate allows rendering.
pub fn install_role_redirect<S, F>(auth: AuthContext, role: Role, store: S, navigate: F) -> RwSignal<bool>
where
    S: SessionStore + 'static,
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    let allowed = RwSignal::new(false);
    Effect::new(move || {
        if !auth.is_restored() {
            return;
        }
        // Track session changes so logout re-evaluates the gate.
        auth.track();
        match gate(role, &store) {
            Gate::Render => allowed.set(true),
            Gate::Redirect(path) => {
                allowed.set(false);
                navigate(path, NavigateOptions { replace: true, ..NavigateOptions::default() });
            }
        }
    });
    allowed
}
