//! Teacher landing page: greeting, weekly schedule and shortcuts.

#[cfg(test)]
#[path = "teacher_dashboard_test.rs"]
mod teacher_dashboard_test;

use leptos::prelude::*;

use crate::components::dashboard_layout::DashboardLayout;
use crate::components::notice::Notice;
use crate::net::attendance::list_schedules;
use crate::net::request::{GENERIC_FAILURE, GlooTransport};
use crate::net::types::Schedule;
use crate::pages::teacher_attendance::{WEEKDAYS, schedule_label};
use crate::state::session::{AuthContext, Role};
use crate::util::task::TaskScope;

/// Sort by weekday then start time; unknown days go last.
pub fn weekly_order(mut schedules: Vec<Schedule>) -> Vec<Schedule> {
    let day_index = |day: &str| WEEKDAYS.iter().position(|d| d.eq_ignore_ascii_case(day)).unwrap_or(WEEKDAYS.len());
    schedules.sort_by(|a, b| {
        day_index(&a.day)
            .cmp(&day_index(&b.day))
            .then_with(|| a.start_time.cmp(&b.start_time))
    });
    schedules
}

#[component]
pub fn TeacherDashboardPage() -> impl IntoView {
    view! {
        <DashboardLayout role=Role::Teacher title="Teacher Dashboard">
            <TeacherOverview />
        </DashboardLayout>
    }
}

#[component]
fn TeacherOverview() -> impl IntoView {
    let auth = expect_context::<AuthContext>();
    let tasks = TaskScope::new();
    let schedules = RwSignal::new(Vec::<Schedule>::new());
    let error = RwSignal::new(String::new());

    Effect::new(move || {
        let Some(session) = auth.current() else {
            return;
        };
        tasks.spawn(async move {
            match list_schedules(&GlooTransport, &session).await {
                Ok(list) => schedules.set(weekly_order(list)),
                Err(e) => error.set(e.user_message(GENERIC_FAILURE)),
            }
        });
    });

    view! {
        <section class="dash-card">
            <h2 class="dash-card__title">"Welcome, " {move || auth.display_name(Role::Teacher)}</h2>
            <div class="dash-card__links">
                <a class="btn" href="/teacherdash/marks">"Enter Marks"</a>
                <a class="btn" href="/teacherdash/attendance">"Take Attendance"</a>
                <a class="btn" href="/teacherdash/tests">"Tests"</a>
                <a class="btn" href="/teacherdash/classroom">"Google Classroom"</a>
            </div>
        </section>
        <section class="dash-card">
            <h2 class="dash-card__title">"Weekly Schedule"</h2>
            <Notice error=error />
            <Show
                when=move || schedules.with(|s| !s.is_empty())
                fallback=|| view! { <p class="data-table__empty">"No classes scheduled yet."</p> }
            >
                <ul class="dash-list">
                    {move || {
                        schedules
                            .get()
                            .iter()
                            .map(|s| view! { <li class="dash-list__item">{schedule_label(s)}</li> })
                            .collect::<Vec<_>>()
                    }}
                </ul>
            </Show>
        </section>
    }
}
