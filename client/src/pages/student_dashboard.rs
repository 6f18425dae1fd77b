//! Student landing page: marks and attendance.

#[cfg(test)]
#[path = "student_dashboard_test.rs"]
mod student_dashboard_test;

use leptos::prelude::*;

use crate::components::dashboard_layout::DashboardLayout;
use crate::components::data_table::DataTable;
use crate::components::notice::Notice;
use crate::net::attendance::{AttendanceSummary, attendance_table, my_attendance};
use crate::net::marks::{format_score, marks_table, my_marks};
use crate::net::request::{GENERIC_FAILURE, GlooTransport};
use crate::net::types::{AttendanceRecord, MarkRecord};
use crate::state::session::{AuthContext, Role};
use crate::util::task::TaskScope;

pub fn attendance_line(summary: AttendanceSummary) -> String {
    match summary.percentage() {
        Some(pct) => format!("{} of {} classes attended ({pct}%)", summary.present, summary.total),
        None => "No attendance recorded yet.".to_owned(),
    }
}

/// Overall score across every record, as `(scored, possible)`.
pub fn overall(records: &[MarkRecord]) -> (f64, f64) {
    records.iter().fold((0.0, 0.0), |(s, m), r| (s + r.total, m + r.max_total))
}

#[component]
pub fn StudentDashboardPage() -> impl IntoView {
    view! {
        <DashboardLayout role=Role::Student title="Student Dashboard">
            <StudentOverview />
        </DashboardLayout>
    }
}

#[component]
fn StudentOverview() -> impl IntoView {
    let auth = expect_context::<AuthContext>();
    let tasks = TaskScope::new();
    let marks = RwSignal::new(Vec::<MarkRecord>::new());
    let attendance = RwSignal::new(Vec::<AttendanceRecord>::new());
    let error = RwSignal::new(String::new());

    Effect::new(move || {
        let Some(session) = auth.current() else {
            return;
        };
        let attendance_session = session.clone();
        tasks.spawn(async move {
            match my_marks(&GlooTransport, &session).await {
                Ok(list) => marks.set(list),
                Err(e) => error.set(e.user_message(GENERIC_FAILURE)),
            }
        });
        tasks.spawn(async move {
            match my_attendance(&GlooTransport, &attendance_session).await {
                Ok(list) => attendance.set(list),
                Err(e) => error.set(e.user_message(GENERIC_FAILURE)),
            }
        });
    });

    view! {
        <section class="dash-card">
            <h2 class="dash-card__title">"Hello, " {move || auth.display_name(Role::Student)}</h2>
            <Notice error=error />
            <p class="dash-card__stat">
                {move || attendance.with(|r| attendance_line(AttendanceSummary::from_records(r)))}
            </p>
            <p class="dash-card__stat">
                {move || {
                    let (scored, possible) = marks.with(|r| overall(r));
                    format!("Overall marks: {} / {}", format_score(scored), format_score(possible))
                }}
            </p>
            <a class="btn" href="/studentdash/tests">"Take a Test"</a>
        </section>
        <section class="dash-card">
            <h2 class="dash-card__title">"My Marks"</h2>
            {move || {
                let (headers, rows) = marks.with(|r| marks_table(r));
                view! { <DataTable headers=headers rows=rows empty="No marks published yet." /> }
            }}
        </section>
        <section class="dash-card">
            <h2 class="dash-card__title">"My Attendance"</h2>
            {move || {
                let (headers, rows) = attendance.with(|r| attendance_table(r));
                view! { <DataTable headers=headers rows=rows empty="No attendance recorded yet." /> }
            }}
        </section>
    }
}
