//! Forgot-password and reset-password screens.

#[cfg(test)]
#[path = "password_test.rs"]
mod password_test;

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use crate::components::notice::Notice;
use crate::net::auth::{change_password, request_password_reset};
use crate::net::request::{GlooTransport, Transport};
use crate::util::task::TaskScope;

pub const MIN_PASSWORD_LEN: usize = 6;
const RESET_SENT: &str = "If that email is registered, a reset link is on its way.";
const PASSWORD_CHANGED: &str = "Password updated. You can sign in now.";

/// Length and confirmation checks shared by signup and reset.
pub fn validate_new_password(password: &str, confirm: &str) -> Result<(), &'static str> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err("Password must be at least 6 characters.");
    }
    if password != confirm {
        return Err("Passwords do not match.");
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<String, &'static str> {
    let email = email.trim();
    if email.is_empty() {
        return Err("Enter your email.");
    }
    if !email.contains('@') {
        return Err("Enter a valid email address.");
    }
    Ok(email.to_owned())
}

/// Validate locally, then ask the backend to change the password.
///
/// # Errors
///
/// Returns the text to show: a validation message (no request sent) or the
/// backend's message.
pub async fn submit_reset<X: Transport + ?Sized>(
    transport: &X,
    reset_token: &str,
    password: &str,
    confirm: &str,
) -> Result<String, String> {
    if reset_token.trim().is_empty() {
        return Err("This reset link is invalid.".to_owned());
    }
    validate_new_password(password, confirm).map_err(str::to_owned)?;
    change_password(transport, reset_token, password)
        .await
        .map(|msg| msg.unwrap_or_else(|| PASSWORD_CHANGED.to_owned()))
        .map_err(|e| e.user_message("Could not reset password"))
}

#[component]
pub fn ForgotPasswordPage() -> impl IntoView {
    let tasks = TaskScope::new();
    let email = RwSignal::new(String::new());
    let error = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let email_value = match validate_email(&email.get()) {
            Ok(v) => v,
            Err(msg) => {
                error.set(msg.to_owned());
                return;
            }
        };
        error.set(String::new());
        info.set(String::new());
        busy.set(true);
        tasks.spawn(async move {
            match request_password_reset(&GlooTransport, &email_value).await {
                Ok(msg) => info.set(msg.unwrap_or_else(|| RESET_SENT.to_owned())),
                Err(e) => error.set(e.user_message("Could not send reset email")),
            }
            busy.set(false);
        });
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Reset Password"</h1>
                <p class="login-card__subtitle">"We'll email you a reset link."</p>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="email"
                        placeholder="you@school.edu"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        "Send Reset Link"
                    </button>
                </form>
                <Notice error=error info=info />
                <p class="login-card__links"><a href="/teacherlogin">"Back to login"</a></p>
            </div>
        </div>
    }
}

#[component]
pub fn ResetPasswordPage() -> impl IntoView {
    let params = use_params_map();
    let tasks = TaskScope::new();
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let error = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let token = params.with(|p| p.get("token").unwrap_or_default());
        let new_password = password.get();
        let confirm_value = confirm.get();
        // Mismatch is reported without touching the network.
        if let Err(msg) = validate_new_password(&new_password, &confirm_value) {
            error.set(msg.to_owned());
            return;
        }
        error.set(String::new());
        busy.set(true);
        tasks.spawn(async move {
            match submit_reset(&GlooTransport, &token, &new_password, &confirm_value).await {
                Ok(msg) => info.set(msg),
                Err(msg) => error.set(msg),
            }
            busy.set(false);
        });
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Choose a New Password"</h1>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="password"
                        placeholder="New password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        placeholder="Confirm password"
                        prop:value=move || confirm.get()
                        on:input=move |ev| confirm.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        "Update Password"
                    </button>
                </form>
                <Notice error=error info=info />
                <p class="login-card__links"><a href="/teacherlogin">"Back to login"</a></p>
            </div>
        </div>
    }
}
