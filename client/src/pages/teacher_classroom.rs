//! Google Classroom connection and grade sync.
//!
//! SYSTEM CONTEXT
//! ==============
//! Connecting sends the browser to Google's consent screen via a URL the
//! backend issues; Google's redirect lands back here with
//! `?classroom=connected|error`, after which the status is re-read.

#[cfg(test)]
#[path = "teacher_classroom_test.rs"]
mod teacher_classroom_test;

use leptos::prelude::*;
use leptos_router::hooks::use_query_map;

use crate::components::dashboard_layout::DashboardLayout;
use crate::components::notice::Notice;
use crate::net::classroom::{assignments, connect_url, courses, status, sync_assignment, sync_summary};
use crate::net::marks::format_score;
use crate::net::oauth::{ClassroomReturn, parse_classroom_return};
use crate::net::request::{GENERIC_FAILURE, GlooTransport};
use crate::net::types::{Assignment, ClassroomStatus, Course};
use crate::state::session::{AuthContext, Role};
use crate::util::location::open_external;
use crate::util::task::TaskScope;

pub fn course_label(course: &Course) -> String {
    match course.section.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(section) => format!("{} ({section})", course.name),
        None => course.name.clone(),
    }
}

pub fn assignment_detail(assignment: &Assignment) -> String {
    let points = assignment.max_points.map_or_else(|| "ungraded".to_owned(), |p| format!("{} pts", format_score(p)));
    match assignment.due_date.as_deref().filter(|d| !d.is_empty()) {
        Some(due) => format!("{points} · due {due}"),
        None => points,
    }
}

pub fn status_line(status: &ClassroomStatus) -> String {
    match (status.connected, status.email.as_deref()) {
        (true, Some(email)) if !email.is_empty() => format!("Connected as {email}"),
        (true, _) => "Connected".to_owned(),
        (false, _) => "Not connected".to_owned(),
    }
}

#[component]
pub fn TeacherClassroomPage() -> impl IntoView {
    view! {
        <DashboardLayout role=Role::Teacher title="Google Classroom">
            <ClassroomWorkspace />
        </DashboardLayout>
    }
}

#[component]
fn ClassroomWorkspace() -> impl IntoView {
    let auth = expect_context::<AuthContext>();
    let query = use_query_map();
    let tasks = TaskScope::new();
    let connection = RwSignal::new(None::<ClassroomStatus>);
    let course_list = RwSignal::new(Vec::<Course>::new());
    let selected_course = RwSignal::new(None::<Course>);
    let assignment_list = RwSignal::new(Vec::<Assignment>::new());
    let error = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    Effect::new(move || {
        match query.with(|q| parse_classroom_return(q.get_str("classroom"))) {
            Some(ClassroomReturn::Connected) => info.set("Google Classroom connected.".to_owned()),
            Some(ClassroomReturn::Error) => error.set("Google Classroom connection failed.".to_owned()),
            None => {}
        }
        let Some(session) = auth.current() else {
            return;
        };
        tasks.spawn(async move {
            match status(&GlooTransport, &session).await {
                Ok(s) => {
                    let connected = s.connected;
                    connection.set(Some(s));
                    if connected {
                        match courses(&GlooTransport, &session).await {
                            Ok(list) => course_list.set(list),
                            Err(e) => error.set(e.user_message(GENERIC_FAILURE)),
                        }
                    }
                }
                Err(e) => error.set(e.user_message(GENERIC_FAILURE)),
            }
        });
    });

    let on_connect = move |_| {
        let Some(session) = auth.current_untracked() else {
            return;
        };
        busy.set(true);
        tasks.spawn(async move {
            match connect_url(&GlooTransport, &session).await {
                Ok(url) => {
                    if !open_external(&url) {
                        error.set("Could not open the Google connection page".to_owned());
                        busy.set(false);
                    }
                }
                Err(e) => {
                    error.set(e.user_message("Could not start the Google connection"));
                    busy.set(false);
                }
            }
        });
    };

    let on_pick_course = move |course: Course| {
        let Some(session) = auth.current_untracked() else {
            return;
        };
        selected_course.set(Some(course.clone()));
        assignment_list.set(Vec::new());
        tasks.spawn(async move {
            match assignments(&GlooTransport, &session, &course.id).await {
                Ok(list) => assignment_list.set(list),
                Err(e) => error.set(e.user_message(GENERIC_FAILURE)),
            }
        });
    };

    let on_sync = move |assignment_id: String| {
        let Some(session) = auth.current_untracked() else {
            return;
        };
        let Some(course) = selected_course.get_untracked() else {
            return;
        };
        busy.set(true);
        tasks.spawn(async move {
            match sync_assignment(&GlooTransport, &session, &course.id, &assignment_id).await {
                Ok(result) => info.set(sync_summary(&result)),
                Err(e) => error.set(e.user_message("Sync failed")),
            }
            busy.set(false);
        });
    };

    view! {
        <section class="dash-card">
            <div class="dash-card__toolbar">
                <h2 class="dash-card__title">
                    {move || connection.with(|c| c.as_ref().map_or_else(|| "Checking connection...".to_owned(), status_line))}
                </h2>
                <Show when=move || connection.with(|c| c.as_ref().is_some_and(|c| !c.connected))>
                    <button class="btn btn--primary" on:click=on_connect disabled=move || busy.get()>
                        "Connect Google Classroom"
                    </button>
                </Show>
            </div>
            <Notice error=error info=info />
        </section>
        <Show when=move || connection.with(|c| c.as_ref().is_some_and(|c| c.connected))>
            <section class="dash-card">
                <h2 class="dash-card__title">"Courses"</h2>
                <ul class="dash-list">
                    <For each=move || course_list.get() key=|c| c.id.clone() let:course>
                        {
                            let label = course_label(&course);
                            let id = course.id.clone();
                            view! {
                                <li class="dash-list__item">
                                    <button
                                        class="btn btn--link"
                                        class=("btn--active", move || selected_course.with(|s| s.as_ref().is_some_and(|s| s.id == id)))
                                        on:click=move |_| on_pick_course(course.clone())
                                    >
                                        {label}
                                    </button>
                                </li>
                            }
                        }
                    </For>
                </ul>
            </section>
            <Show when=move || selected_course.with(Option::is_some)>
                <section class="dash-card">
                    <h2 class="dash-card__title">
                        {move || selected_course.with(|c| c.as_ref().map(course_label).unwrap_or_default())}
                    </h2>
                    <table class="data-table">
                        <tbody>
                            <For each=move || assignment_list.get() key=|a| a.id.clone() let:assignment>
                                {
                                    let id = assignment.id.clone();
                                    view! {
                                        <tr>
                                            <td>{assignment.title.clone()}</td>
                                            <td>{assignment_detail(&assignment)}</td>
                                            <td>
                                                <button
                                                    class="btn btn--small"
                                                    on:click=move |_| on_sync(id.clone())
                                                    disabled=move || busy.get()
                                                >
                                                    "Sync Grades"
                                                </button>
                                            </td>
                                        </tr>
                                    }
                                }
                            </For>
                        </tbody>
                    </table>
                </section>
            </Show>
        </Show>
    }
}
