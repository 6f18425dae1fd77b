//! Dashboard header with role navigation and logout.

#[cfg(test)]
#[path = "nav_bar_test.rs"]
mod nav_bar_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::state::session::{AuthContext, BrowserSessionStore, Role};

/// `(href, label)` pairs shown in a role's header.
pub fn nav_links(role: Role) -> &'static [(&'static str, &'static str)] {
    match role {
        Role::Admin => &[
            ("/admindash", "Overview"),
            ("/admindash/students", "Students"),
            ("/admindash/teachers", "Teachers"),
            ("/admindash/marks", "Marks"),
        ],
        Role::Teacher => &[
            ("/teacherdash", "Overview"),
            ("/teacherdash/marks", "Marks"),
            ("/teacherdash/attendance", "Attendance"),
            ("/teacherdash/tests", "Tests"),
            ("/teacherdash/classroom", "Classroom"),
        ],
        Role::Student => &[("/studentdash", "Overview"), ("/studentdash/tests", "Tests")],
    }
}

#[component]
pub fn NavBar(role: Role) -> impl IntoView {
    let auth = expect_context::<AuthContext>();
    let navigate = use_navigate();

    let on_logout = move |_| {
        let role = auth.logout(&BrowserSessionStore).unwrap_or(role);
        navigate(role.login_path(), NavigateOptions { replace: true, ..NavigateOptions::default() });
    };

    view! {
        <header class="dash-header">
            <span class="dash-header__brand">"Gradyze"</span>
            <span class="dash-header__role">{role.label()}</span>
            <nav class="dash-header__links">
                {nav_links(role)
                    .iter()
                    .map(|(href, label)| view! { <a class="dash-header__link" href=*href>{*label}</a> })
                    .collect::<Vec<_>>()}
            </nav>
            <span class="dash-header__spacer"></span>
            <span class="dash-header__name">{move || auth.display_name(role)}</span>
            <button class="btn dash-header__logout" on:click=on_logout>
                "Logout"
            </button>
        </header>
    }
}
