//! Class schedules and roll call.
//!
//! SYSTEM CONTEXT
//! ==============
//! Attendance is recorded per schedule (a weekly class slot) and date. The
//! teacher loads the schedule's class roster into a `RollCall`, where every
//! student starts present and anything already recorded for that date is
//! overlaid, then toggles absentees and submits the whole sheet.

#[cfg(test)]
#[path = "teacher_attendance_test.rs"]
mod teacher_attendance_test;

use leptos::prelude::*;

use crate::components::dashboard_layout::DashboardLayout;
use crate::components::notice::Notice;
use crate::net::attendance::{
    attendance_table, create_schedule, delete_attendance, delete_schedule, list_attendance, list_schedules,
    mark_attendance,
};
use crate::net::marks::class_students;
use crate::net::request::{GENERIC_FAILURE, GlooTransport};
use crate::net::types::{AttendanceRecord, AttendanceStatus, Schedule, ScheduleInput};
use crate::state::roll_call::RollCall;
use crate::state::session::{AuthContext, Role};
use crate::util::export::{ExportFormat, export_table};
use crate::util::task::TaskScope;

pub const WEEKDAYS: [&str; 7] = ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday"];

/// Require subject, class and a known weekday; times must be `HH:MM` with start before end.
pub fn validate_schedule(input: &ScheduleInput) -> Result<ScheduleInput, &'static str> {
    let trimmed = ScheduleInput {
        subject: input.subject.trim().to_owned(),
        class_name: input.class_name.trim().to_owned(),
        day: input.day.trim().to_owned(),
        start_time: input.start_time.trim().to_owned(),
        end_time: input.end_time.trim().to_owned(),
    };
    if trimmed.subject.is_empty() || trimmed.class_name.is_empty() {
        return Err("Enter a subject and class.");
    }
    if !WEEKDAYS.contains(&trimmed.day.as_str()) {
        return Err("Pick a day of the week.");
    }
    let (Some(start), Some(end)) = (clock_minutes(&trimmed.start_time), clock_minutes(&trimmed.end_time)) else {
        return Err("Enter start and end times.");
    };
    if start >= end {
        return Err("The class must end after it starts.");
    }
    Ok(trimmed)
}

fn clock_minutes(raw: &str) -> Option<u32> {
    let (h, m) = raw.split_once(':')?;
    let (h, m) = (h.parse::<u32>().ok()?, m.parse::<u32>().ok()?);
    (h < 24 && m < 60).then_some(h * 60 + m)
}

pub fn schedule_label(s: &Schedule) -> String {
    format!("{} · Class {} · {} {}-{}", s.subject, s.class_name, s.day, s.start_time, s.end_time)
}

#[component]
pub fn TeacherAttendancePage() -> impl IntoView {
    view! {
        <DashboardLayout role=Role::Teacher title="Attendance">
            <AttendanceWorkspace />
        </DashboardLayout>
    }
}

#[component]
fn AttendanceWorkspace() -> impl IntoView {
    let auth = expect_context::<AuthContext>();
    let tasks = TaskScope::new();
    let schedules = RwSignal::new(Vec::<Schedule>::new());
    let schedule_form = RwSignal::new(ScheduleInput { day: WEEKDAYS[0].to_owned(), ..ScheduleInput::default() });
    let selected = RwSignal::new(String::new());
    let date = RwSignal::new(String::new());
    let roll = RwSignal::new(RollCall::default());
    let records = RwSignal::new(Vec::<AttendanceRecord>::new());
    let error = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);
    let reload = RwSignal::new(0_u32);

    Effect::new(move || {
        reload.track();
        let Some(session) = auth.current() else {
            return;
        };
        tasks.spawn(async move {
            match list_schedules(&GlooTransport, &session).await {
                Ok(list) => schedules.set(list),
                Err(e) => error.set(e.user_message(GENERIC_FAILURE)),
            }
        });
    });

    let on_create = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Some(session) = auth.current_untracked() else {
            return;
        };
        let input = match validate_schedule(&schedule_form.get()) {
            Ok(i) => i,
            Err(msg) => {
                error.set(msg.to_owned());
                return;
            }
        };
        error.set(String::new());
        tasks.spawn(async move {
            match create_schedule(&GlooTransport, &session, &input).await {
                Ok(()) => {
                    info.set("Schedule created.".to_owned());
                    schedule_form.set(ScheduleInput { day: input.day, ..ScheduleInput::default() });
                    reload.update(|n| *n += 1);
                }
                Err(e) => error.set(e.user_message(GENERIC_FAILURE)),
            }
        });
    };

    let on_delete_schedule = move |id: String| {
        let Some(session) = auth.current_untracked() else {
            return;
        };
        tasks.spawn(async move {
            match delete_schedule(&GlooTransport, &session, &id).await {
                Ok(()) => {
                    if selected.get_untracked() == id {
                        selected.set(String::new());
                        roll.set(RollCall::default());
                    }
                    reload.update(|n| *n += 1);
                }
                Err(e) => error.set(e.user_message(GENERIC_FAILURE)),
            }
        });
    };

    let load_records = move || {
        let Some(session) = auth.current_untracked() else {
            return;
        };
        let (schedule_id, day) = (selected.get_untracked(), date.get_untracked());
        tasks.spawn(async move {
            match list_attendance(&GlooTransport, &session, &schedule_id, &day).await {
                Ok(list) => {
                    roll.update(|r| r.apply_records(&list));
                    records.set(list);
                }
                Err(e) => error.set(e.user_message(GENERIC_FAILURE)),
            }
        });
    };

    let on_load_roll = move |_| {
        let Some(session) = auth.current_untracked() else {
            return;
        };
        let schedule_id = selected.get_untracked();
        let day = date.get_untracked();
        let Some(schedule) = schedules.with_untracked(|s| s.iter().find(|s| s.id == schedule_id).cloned()) else {
            error.set("Select a schedule.".to_owned());
            return;
        };
        if day.is_empty() {
            error.set("Select a date.".to_owned());
            return;
        }
        error.set(String::new());
        busy.set(true);
        tasks.spawn(async move {
            match class_students(&GlooTransport, &session, &schedule.class_name).await {
                Ok(students) => {
                    roll.set(RollCall::new(&schedule.id, &day, &students));
                    load_records();
                }
                Err(e) => error.set(e.user_message(GENERIC_FAILURE)),
            }
            busy.set(false);
        });
    };

    let on_submit = move |_| {
        if busy.get() {
            return;
        }
        let Some(session) = auth.current_untracked() else {
            return;
        };
        let body = match roll.with_untracked(RollCall::submission) {
            Ok(b) => b,
            Err(msg) => {
                error.set(msg.to_owned());
                return;
            }
        };
        error.set(String::new());
        busy.set(true);
        tasks.spawn(async move {
            match mark_attendance(&GlooTransport, &session, &body).await {
                Ok(()) => {
                    info.set("Attendance saved.".to_owned());
                    load_records();
                }
                Err(e) => error.set(e.user_message("Could not save attendance")),
            }
            busy.set(false);
        });
    };

    let on_delete_record = move |id: String| {
        let Some(session) = auth.current_untracked() else {
            return;
        };
        tasks.spawn(async move {
            match delete_attendance(&GlooTransport, &session, &id).await {
                Ok(()) => records.update(|r| r.retain(|rec| rec.id != id)),
                Err(e) => error.set(e.user_message(GENERIC_FAILURE)),
            }
        });
    };

    let on_export = move |format: ExportFormat| {
        let (header, rows) = records.with_untracked(|r| attendance_table(r));
        if let Err(e) = export_table(format, "attendance", &date.get_untracked(), &header, &rows) {
            error.set(e.user_message().to_owned());
        }
    };

    let text_input = move |placeholder: &'static str,
                           kind: &'static str,
                           get: fn(&ScheduleInput) -> String,
                           set: fn(&mut ScheduleInput, String)| {
        view! {
            <input
                class="dash-input"
                type=kind
                placeholder=placeholder
                prop:value=move || schedule_form.with(get)
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    schedule_form.update(|f| set(f, value));
                }
            />
        }
    };

    view! {
        <section class="dash-card">
            <h2 class="dash-card__title">"Schedules"</h2>
            <form class="dash-form" on:submit=on_create>
                {text_input("Subject", "text", |f| f.subject.clone(), |f, v| f.subject = v)}
                {text_input("Class", "text", |f| f.class_name.clone(), |f, v| f.class_name = v)}
                <select
                    class="dash-select"
                    prop:value=move || schedule_form.with(|f| f.day.clone())
                    on:change=move |ev| {
                        let value = event_target_value(&ev);
                        schedule_form.update(|f| f.day = value);
                    }
                >
                    {WEEKDAYS.into_iter().map(|d| view! { <option value=d>{d}</option> }).collect::<Vec<_>>()}
                </select>
                {text_input("Start", "time", |f| f.start_time.clone(), |f, v| f.start_time = v)}
                {text_input("End", "time", |f| f.end_time.clone(), |f, v| f.end_time = v)}
                <button class="btn btn--primary" type="submit">"Add Schedule"</button>
            </form>
            <ul class="dash-list">
                <For each=move || schedules.get() key=|s| s.id.clone() let:schedule>
                    {
                        let id = schedule.id.clone();
                        view! {
                            <li class="dash-list__item">
                                <span>{schedule_label(&schedule)}</span>
                                <button class="btn btn--small btn--danger" on:click=move |_| on_delete_schedule(id.clone())>
                                    "Delete"
                                </button>
                            </li>
                        }
                    }
                </For>
            </ul>
        </section>
        <section class="dash-card">
            <h2 class="dash-card__title">"Roll Call"</h2>
            <div class="dash-form">
                <select
                    class="dash-select"
                    prop:value=move || selected.get()
                    on:change=move |ev| selected.set(event_target_value(&ev))
                >
                    <option value="">"Select a schedule"</option>
                    {move || {
                        schedules
                            .get()
                            .into_iter()
                            .map(|s| view! { <option value=s.id.clone()>{schedule_label(&s)}</option> })
                            .collect::<Vec<_>>()
                    }}
                </select>
                <input
                    class="dash-input"
                    type="date"
                    prop:value=move || date.get()
                    on:input=move |ev| date.set(event_target_value(&ev))
                />
                <button class="btn" on:click=on_load_roll disabled=move || busy.get()>
                    "Load Roll"
                </button>
            </div>
            <Notice error=error info=info />
            <Show when=move || roll.with(|r| !r.entries.is_empty())>
                <div class="dash-card__toolbar">
                    <span>
                        {move || {
                            let (present, absent) = roll.with(RollCall::counts);
                            format!("{present} present, {absent} absent")
                        }}
                    </span>
                    <button class="btn" on:click=move |_| roll.update(|r| r.mark_all(AttendanceStatus::Present))>
                        "All Present"
                    </button>
                    <button class="btn" on:click=move |_| roll.update(|r| r.mark_all(AttendanceStatus::Absent))>
                        "All Absent"
                    </button>
                </div>
                <table class="data-table">
                    <tbody>
                        {move || {
                            roll.get()
                                .entries
                                .into_iter()
                                .map(|entry| {
                                    let id = entry.student_id.clone();
                                    let absent = entry.status == AttendanceStatus::Absent;
                                    view! {
                                        <tr>
                                            <td>{entry.roll_no}</td>
                                            <td>{entry.name}</td>
                                            <td>
                                                <button
                                                    class={if absent { "btn btn--small btn--danger" } else { "btn btn--small" }}
                                                    on:click=move |_| roll.update(|r| r.toggle(&id))
                                                >
                                                    {entry.status.label()}
                                                </button>
                                            </td>
                                        </tr>
                                    }
                                })
                                .collect::<Vec<_>>()
                        }}
                    </tbody>
                </table>
                <button class="btn btn--primary" on:click=on_submit disabled=move || busy.get()>
                    "Submit Attendance"
                </button>
            </Show>
        </section>
        <section class="dash-card">
            <div class="dash-card__toolbar">
                <h2 class="dash-card__title">"Recorded"</h2>
                <button
                    class="btn"
                    on:click=move |_| on_export(ExportFormat::Xlsx)
                    disabled=move || records.with(Vec::is_empty)
                >
                    "Export Excel"
                </button>
                <button
                    class="btn"
                    on:click=move |_| on_export(ExportFormat::Csv)
                    disabled=move || records.with(Vec::is_empty)
                >
                    "Export CSV"
                </button>
            </div>
            <table class="data-table">
                <tbody>
                    <For each=move || records.get() key=|r| r.id.clone() let:record>
                        {
                            let id = record.id.clone();
                            view! {
                                <tr>
                                    <td>{record.date.clone()}</td>
                                    <td>{record.student_name.clone()}</td>
                                    <td>{record.status.label()}</td>
                                    <td>
                                        <button class="btn btn--small btn--danger" on:click=move |_| on_delete_record(id.clone())>
                                            "Delete"
                                        </button>
                                    </td>
                                </tr>
                            }
                        }
                    </For>
                </tbody>
            </table>
        </section>
    }
}
