//! Route wrapper that renders its children only for the owning role.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every dashboard route is wrapped in `RoleGate`. The gate waits for the
//! session to be restored from the tab's storage, then either renders the
//! children or replaces the location with the role's login screen.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::state::session::{AuthContext, BrowserSessionStore, Role};
use crate::util::auth::install_role_redirect;

#[component]
pub fn RoleGate(role: Role, children: ChildrenFn) -> impl IntoView {
    let auth = expect_context::<AuthContext>();
    let navigate = use_navigate();
    let allowed = install_role_redirect(auth, role, BrowserSessionStore, navigate);

    view! {
        <Show
            when=move || allowed.get()
            fallback=|| view! { <div class="gate-page"><p>"Checking session..."</p></div> }
        >
            {children()}
        </Show>
    }
}
