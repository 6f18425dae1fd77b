//! Gated page frame shared by every dashboard route.

use leptos::prelude::*;

use crate::components::nav_bar::NavBar;
use crate::components::role_gate::RoleGate;
use crate::state::session::Role;

#[component]
pub fn DashboardLayout(role: Role, title: &'static str, children: ChildrenFn) -> impl IntoView {
    view! {
        <RoleGate role=role>
            <div class="dash-page">
                <NavBar role=role />
                <main class="dash-page__main">
                    <h1 class="dash-page__title">{title}</h1>
                    {children()}
                </main>
            </div>
        </RoleGate>
    }
}
