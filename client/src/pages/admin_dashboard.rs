//! Admin overview and institution-wide marks.
//!
//! SYSTEM CONTEXT
//! ==============
//! The overview greets the admin by the name the backend stores for the
//! institution (falling back to "Admin") and links to the management pages.
//! The marks page lists every submitted record with a subject filter and
//! Excel/CSV exports built from exactly the rows on screen.

#[cfg(test)]
#[path = "admin_dashboard_test.rs"]
mod admin_dashboard_test;

use leptos::prelude::*;

use crate::components::dashboard_layout::DashboardLayout;
use crate::components::data_table::DataTable;
use crate::components::notice::Notice;
use crate::net::admin::{DEFAULT_ADMIN_NAME, fetch_admin_name, fetch_marks_overview};
use crate::net::marks::{marks_table, subjects};
use crate::net::request::{GENERIC_FAILURE, GlooTransport};
use crate::net::types::MarkRecord;
use crate::state::session::{AuthContext, Role};
use crate::util::export::{ExportError, ExportFormat, export_table};
use crate::util::task::TaskScope;

/// Records for `subject`; an empty subject keeps everything.
pub fn filter_by_subject(records: &[MarkRecord], subject: &str) -> Vec<MarkRecord> {
    records
        .iter()
        .filter(|r| subject.is_empty() || r.subject == subject)
        .cloned()
        .collect()
}

/// Download `records` as a marks sheet named after `qualifier`.
///
/// # Errors
///
/// Fails when the file cannot be built or the browser refuses it.
pub fn export_marks(records: &[MarkRecord], qualifier: &str, format: ExportFormat) -> Result<(), ExportError> {
    let (header, rows) = marks_table(records);
    export_table(format, "marks", qualifier, &header, &rows)
}

#[component]
pub fn AdminDashboardPage() -> impl IntoView {
    view! {
        <DashboardLayout role=Role::Admin title="Admin Dashboard">
            <AdminOverview />
        </DashboardLayout>
    }
}

#[component]
fn AdminOverview() -> impl IntoView {
    let auth = expect_context::<AuthContext>();
    let tasks = TaskScope::new();
    let admin_name = RwSignal::new(DEFAULT_ADMIN_NAME.to_owned());
    let error = RwSignal::new(String::new());

    Effect::new(move || {
        let Some(session) = auth.current() else {
            return;
        };
        tasks.spawn(async move {
            match fetch_admin_name(&GlooTransport, &session).await {
                Ok(name) => admin_name.set(name),
                Err(e) => error.set(e.user_message(GENERIC_FAILURE)),
            }
        });
    });

    view! {
        <section class="dash-card">
            <h2 class="dash-card__title">"Welcome, " {move || admin_name.get()}</h2>
            <Notice error=error />
            <div class="dash-card__links">
                <a class="btn" href="/admindash/students">"Manage Students"</a>
                <a class="btn" href="/admindash/teachers">"Manage Teachers"</a>
                <a class="btn" href="/admindash/marks">"View Marks"</a>
            </div>
        </section>
    }
}

#[component]
pub fn AdminMarksPage() -> impl IntoView {
    view! {
        <DashboardLayout role=Role::Admin title="Marks Overview">
            <MarksOverview />
        </DashboardLayout>
    }
}

#[component]
fn MarksOverview() -> impl IntoView {
    let auth = expect_context::<AuthContext>();
    let tasks = TaskScope::new();
    let records = RwSignal::new(Vec::<MarkRecord>::new());
    let subject = RwSignal::new(String::new());
    let loading = RwSignal::new(true);
    let error = RwSignal::new(String::new());

    Effect::new(move || {
        let Some(session) = auth.current() else {
            return;
        };
        loading.set(true);
        tasks.spawn(async move {
            match fetch_marks_overview(&GlooTransport, &session).await {
                Ok(list) => records.set(list),
                Err(e) => error.set(e.user_message(GENERIC_FAILURE)),
            }
            loading.set(false);
        });
    });

    let visible = Memo::new(move |_| records.with(|r| filter_by_subject(r, &subject.get())));

    let on_export = move |format: ExportFormat| {
        if let Err(e) = export_marks(&visible.get_untracked(), &subject.get_untracked(), format) {
            error.set(e.user_message().to_owned());
        }
    };

    view! {
        <section class="dash-card">
            <div class="dash-card__toolbar">
                <select
                    class="dash-select"
                    on:change=move |ev| subject.set(event_target_value(&ev))
                    prop:value=move || subject.get()
                >
                    <option value="">"All subjects"</option>
                    {move || {
                        records
                            .with(|r| subjects(r))
                            .into_iter()
                            .map(|s| view! { <option value=s.clone()>{s.clone()}</option> })
                            .collect::<Vec<_>>()
                    }}
                </select>
                <button
                    class="btn"
                    on:click=move |_| on_export(ExportFormat::Xlsx)
                    disabled=move || visible.with(Vec::is_empty)
                >
                    "Export Excel"
                </button>
                <button
                    class="btn"
                    on:click=move |_| on_export(ExportFormat::Csv)
                    disabled=move || visible.with(Vec::is_empty)
                >
                    "Export CSV"
                </button>
            </div>
            <Notice error=error />
            <Show when=move || !loading.get() fallback=|| view! { <p>"Loading marks..."</p> }>
                {move || {
                    let (headers, rows) = visible.with(|r| marks_table(r));
                    view! { <DataTable headers=headers rows=rows empty="No marks submitted yet." /> }
                }}
            </Show>
        </section>
    }
}
