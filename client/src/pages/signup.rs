//! Admin signup for a new institution.

#[cfg(test)]
#[path = "signup_test.rs"]
mod signup_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::notice::Notice;
use crate::net::auth::admin_signup;
use crate::net::request::GlooTransport;
use crate::net::types::AdminSignup;
use crate::pages::password::{validate_email, validate_new_password};
use crate::state::session::Role;
use crate::util::task::TaskScope;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub institution: String,
    pub password: String,
    pub confirm: String,
}

/// Check every field and build the request body.
pub fn validate_signup(form: &SignupForm) -> Result<AdminSignup, &'static str> {
    let name = form.name.trim();
    let institution = form.institution.trim();
    if name.is_empty() || institution.is_empty() {
        return Err("Enter your name and institution.");
    }
    let email = validate_email(&form.email)?;
    validate_new_password(&form.password, &form.confirm)?;
    Ok(AdminSignup {
        name: name.to_owned(),
        email,
        institution: institution.to_owned(),
        password: form.password.clone(),
    })
}

#[component]
pub fn AdminSignupPage() -> impl IntoView {
    let navigate = use_navigate();
    let tasks = TaskScope::new();
    let form = RwSignal::new(SignupForm::default());
    let error = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let body = match validate_signup(&form.get()) {
            Ok(b) => b,
            Err(msg) => {
                error.set(msg.to_owned());
                return;
            }
        };
        error.set(String::new());
        busy.set(true);
        let navigate = navigate.clone();
        tasks.spawn(async move {
            match admin_signup(&GlooTransport, &body).await {
                Ok(_) => navigate(Role::Admin.login_path(), NavigateOptions::default()),
                Err(e) => error.set(e.user_message("Signup failed")),
            }
            busy.set(false);
        });
    };

    let field = move |placeholder: &'static str, kind: &'static str, get: fn(&SignupForm) -> String, set: fn(&mut SignupForm, String)| {
        view! {
            <input
                class="login-input"
                type=kind
                placeholder=placeholder
                prop:value=move || form.with(get)
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    form.update(|f| set(f, value));
                }
            />
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Gradyze"</h1>
                <p class="login-card__subtitle">"Create an Admin Account"</p>
                <form class="login-form" on:submit=on_submit>
                    {field("Full name", "text", |f| f.name.clone(), |f, v| f.name = v)}
                    {field("you@school.edu", "email", |f| f.email.clone(), |f, v| f.email = v)}
                    {field("Institution", "text", |f| f.institution.clone(), |f, v| f.institution = v)}
                    {field("Password", "password", |f| f.password.clone(), |f, v| f.password = v)}
                    {field("Confirm password", "password", |f| f.confirm.clone(), |f, v| f.confirm = v)}
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        "Sign Up"
                    </button>
                </form>
                <Notice error=error />
                <p class="login-card__links">
                    "Already registered? " <a href="/adminlogin">"Sign in"</a>
                </p>
            </div>
        </div>
    }
}
