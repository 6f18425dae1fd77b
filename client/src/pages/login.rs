//! Login screens for the three roles.
//!
//! SYSTEM CONTEXT
//! ==============
//! All three logins share one form. They differ only in the endpoint that
//! issues the token and in what is stored afterwards (see `net::auth`). On
//! failure the backend's message is shown verbatim and the user stays on the
//! page; on success the session is adopted and the role dashboard opens.
//!
//! A login URL carrying a sign-in hand-off (`?token=&role=` or
//! `?credential=`) is completed on arrival. A failed hand-off leaves the user
//! on this screen with the generic authentication message.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_query_map};

use crate::components::notice::Notice;
use crate::net::auth;
use crate::net::oauth::{Handoff, HandoffOutcome, complete_handoff, parse_handoff};
use crate::net::request::{ApiError, GlooTransport, Transport};
use crate::net::types::Credentials;
use crate::state::session::{AuthContext, BrowserSessionStore, Role, Session, SessionStore};
use crate::util::location::open_external;
use crate::util::task::TaskScope;

pub const LOGIN_FAILED: &str = "Login failed";

/// Trim and require both fields before any request is built.
pub fn validate_login_input(email: &str, password: &str) -> Result<Credentials, &'static str> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err("Enter your email and password.");
    }
    if !email.contains('@') {
        return Err("Enter a valid email address.");
    }
    Ok(Credentials { email: email.to_owned(), password: password.to_owned() })
}

/// Run the role's login flow.
///
/// # Errors
///
/// Propagates the flow's `ApiError`; nothing is stored on failure.
pub async fn submit_login<X, S>(transport: &X, store: &S, role: Role, credentials: &Credentials) -> Result<Session, ApiError>
where
    X: Transport + ?Sized,
    S: SessionStore + ?Sized,
{
    match role {
        Role::Admin => auth::admin_login(transport, store, credentials).await,
        Role::Teacher => auth::teacher_login(transport, store, credentials).await,
        Role::Student => auth::student_login(transport, store, credentials).await,
    }
}

/// Complete a hand-off found in the login URL.
///
/// # Errors
///
/// Returns the message to show on the form; the store is left empty.
pub async fn resume_handoff<X, S>(transport: &X, store: &S, handoff: Option<Handoff>) -> Result<Option<Session>, &'static str>
where
    X: Transport + ?Sized,
    S: SessionStore + ?Sized,
{
    match complete_handoff(transport, store, handoff).await {
        HandoffOutcome::NotApplicable => Ok(None),
        HandoffOutcome::SignedIn(session) => Ok(Some(session)),
        HandoffOutcome::Failed { message, .. } => Err(message),
    }
}

#[component]
fn LoginForm(role: Role, #[prop(optional)] children: Option<Children>) -> impl IntoView {
    let auth_ctx = expect_context::<AuthContext>();
    let navigate = use_navigate();
    let tasks = TaskScope::new();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let query = use_query_map();
    let handoff_navigate = navigate.clone();
    Effect::new(move || {
        let handoff = query.with_untracked(|q| parse_handoff(q.get_str("token"), q.get_str("role"), q.get_str("credential")));
        if handoff.is_none() {
            return;
        }
        busy.set(true);
        let navigate = handoff_navigate.clone();
        tasks.spawn(async move {
            match resume_handoff(&GlooTransport, &BrowserSessionStore, handoff).await {
                Ok(Some(session)) => {
                    let path = session.role.dashboard_path();
                    auth_ctx.adopt(session);
                    navigate(path, NavigateOptions { replace: true, ..NavigateOptions::default() });
                }
                Ok(None) => {}
                Err(message) => {
                    auth_ctx.logout(&BrowserSessionStore);
                    error.set(message.to_owned());
                }
            }
            busy.set(false);
        });
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let credentials = match validate_login_input(&email.get(), &password.get()) {
            Ok(c) => c,
            Err(msg) => {
                error.set(msg.to_owned());
                return;
            }
        };
        error.set(String::new());
        busy.set(true);
        let navigate = navigate.clone();
        tasks.spawn(async move {
            match submit_login(&GlooTransport, &BrowserSessionStore, role, &credentials).await {
                Ok(session) => {
                    auth_ctx.adopt(session);
                    navigate(role.dashboard_path(), NavigateOptions::default());
                }
                Err(e) => error.set(e.user_message(LOGIN_FAILED)),
            }
            busy.set(false);
        });
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Gradyze"</h1>
                <p class="login-card__subtitle">{format!("{} Login", role.label())}</p>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="email"
                        placeholder="you@school.edu"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Signing in..." } else { "Sign In" }}
                    </button>
                </form>
                <Notice error=error />
                {children.map(|c| c())}
            </div>
        </div>
    }
}

#[component]
pub fn AdminLoginPage() -> impl IntoView {
    view! {
        <LoginForm role=Role::Admin>
            <p class="login-card__links">
                "New institution? " <a href="/adminsignup">"Create an admin account"</a>
            </p>
        </LoginForm>
    }
}

#[component]
pub fn TeacherLoginPage() -> impl IntoView {
    let google_href = auth::google_oauth_start_url(Role::Teacher);
    view! {
        <LoginForm role=Role::Teacher>
            <div class="login-divider"></div>
            <p class="login-card__subtitle">"Or"</p>
            <a
                href=google_href.clone()
                class="login-button login-button--google"
                on:click=move |ev| {
                    // Otherwise the anchor's own href still navigates.
                    if open_external(&google_href) {
                        ev.prevent_default();
                    }
                }
            >
                "Sign in with Google"
            </a>
            <p class="login-card__links">
                <a href="/forgot-password">"Forgot password?"</a>
            </p>
        </LoginForm>
    }
}

#[component]
pub fn StudentLoginPage() -> impl IntoView {
    view! { <LoginForm role=Role::Student /> }
}
