//! `/auth/callback`: forwards a Google sign-in hand-off to the role's login
//! screen, which completes it and reports failures on its own form.

#[cfg(test)]
#[path = "oauth_callback_test.rs"]
mod oauth_callback_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_query_map};

use crate::net::oauth::{Handoff, parse_handoff};

/// Where the callback sends the browser; `None` when the URL carries no hand-off.
pub fn callback_target(handoff: Option<&Handoff>) -> Option<String> {
    handoff.map(Handoff::login_url)
}

#[component]
pub fn OAuthCallbackPage() -> impl IntoView {
    let query = use_query_map();
    let navigate = use_navigate();

    Effect::new(move || {
        let handoff = query.with_untracked(|q| parse_handoff(q.get_str("token"), q.get_str("role"), q.get_str("credential")));
        if let Some(target) = callback_target(handoff.as_ref()) {
            navigate(&target, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });

    view! {
        <div class="login-page">
            <div class="login-card">
                <p class="login-message">"No sign-in in progress."</p>
                <a class="login-button" href="/">"Back to home"</a>
            </div>
        </div>
    }
}
