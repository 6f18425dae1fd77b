//! Student roster management for admins.
//!
//! SYSTEM CONTEXT
//! ==============
//! One page covers the roster lifecycle: list with a search filter, add and
//! edit through a shared form, delete, bulk import from a spreadsheet, and
//! a per-student PDF report rendered by the backend. Every mutation reloads
//! the list so the table always mirrors the backend.

#[cfg(test)]
#[path = "admin_students_test.rs"]
mod admin_students_test;

use leptos::prelude::*;

use crate::components::dashboard_layout::DashboardLayout;
use crate::components::notice::Notice;
use crate::net::request::{FilePart, GENERIC_FAILURE, GlooTransport};
use crate::net::roster::{
    add_student, delete_student, import_students, is_spreadsheet, list_students, matches_search, student_report_pdf,
    update_student,
};
use crate::net::types::{ImportSummary, Student, StudentInput};
use crate::state::session::{AuthContext, Role};
use crate::util::download::{PDF_MIME, download_bytes, on_file_selected};
use crate::util::task::TaskScope;

/// Trim every field and require name, roll number and class.
pub fn validate_student(input: &StudentInput) -> Result<StudentInput, &'static str> {
    let trimmed = StudentInput {
        name: input.name.trim().to_owned(),
        roll_no: input.roll_no.trim().to_owned(),
        email: input.email.trim().to_owned(),
        class_name: input.class_name.trim().to_owned(),
        section: input.section.trim().to_owned(),
    };
    if trimmed.name.is_empty() || trimmed.roll_no.is_empty() || trimmed.class_name.is_empty() {
        return Err("Name, roll number and class are required.");
    }
    if !trimmed.email.is_empty() && !trimmed.email.contains('@') {
        return Err("Enter a valid email address.");
    }
    Ok(trimmed)
}

pub fn import_message(summary: &ImportSummary) -> String {
    summary
        .message
        .clone()
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| format!("Imported {} student(s), skipped {}.", summary.inserted, summary.skipped))
}

pub fn report_file_name(student: &Student) -> String {
    let base = if student.roll_no.is_empty() { &student.id } else { &student.roll_no };
    format!("report-{base}.pdf")
}

#[component]
pub fn AdminStudentsPage() -> impl IntoView {
    view! {
        <DashboardLayout role=Role::Admin title="Students">
            <StudentRoster />
        </DashboardLayout>
    }
}

#[component]
fn StudentRoster() -> impl IntoView {
    let auth = expect_context::<AuthContext>();
    let tasks = TaskScope::new();
    let students = RwSignal::new(Vec::<Student>::new());
    let search = RwSignal::new(String::new());
    let form = RwSignal::new(StudentInput::default());
    let editing = RwSignal::new(None::<String>);
    let upload = RwSignal::new(None::<FilePart>);
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
            match list_students(&GlooTransport, &session).await {
                Ok(list) => students.set(list),
                Err(e) => error.set(e.user_message(GENERIC_FAILURE)),
            }
        });
    });

    let visible = Memo::new(move |_| {
        let needle = search.get();
        students.with(|s| s.iter().filter(|st| matches_search(st, &needle)).cloned().collect::<Vec<_>>())
    });

    let on_save = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let Some(session) = auth.current_untracked() else {
            return;
        };
        let input = match validate_student(&form.get()) {
            Ok(i) => i,
            Err(msg) => {
                error.set(msg.to_owned());
                return;
            }
        };
        error.set(String::new());
        busy.set(true);
        let target = editing.get();
        tasks.spawn(async move {
            let result = match &target {
                Some(id) => update_student(&GlooTransport, &session, id, &input).await,
                None => add_student(&GlooTransport, &session, &input).await,
            };
            match result {
                Ok(()) => {
                    info.set(if target.is_some() { "Student updated." } else { "Student added." }.to_owned());
                    form.set(StudentInput::default());
                    editing.set(None);
                    reload.update(|n| *n += 1);
                }
                Err(e) => error.set(e.user_message(GENERIC_FAILURE)),
            }
            busy.set(false);
        });
    };

    let on_import = move |_| {
        let Some(session) = auth.current_untracked() else {
            return;
        };
        let Some(file) = upload.get() else {
            error.set("Choose a spreadsheet first.".to_owned());
            return;
        };
        if !is_spreadsheet(&file.file_name) {
            error.set("Upload an .xlsx, .xls or .csv file.".to_owned());
            return;
        }
        error.set(String::new());
        busy.set(true);
        tasks.spawn(async move {
            match import_students(&GlooTransport, &session, file).await {
                Ok(summary) => {
                    info.set(import_message(&summary));
                    upload.set(None);
                    reload.update(|n| *n += 1);
                }
                Err(e) => error.set(e.user_message("Import failed")),
            }
            busy.set(false);
        });
    };

    let on_delete = move |id: String| {
        let Some(session) = auth.current_untracked() else {
            return;
        };
        tasks.spawn(async move {
            match delete_student(&GlooTransport, &session, &id).await {
                Ok(()) => {
                    info.set("Student removed.".to_owned());
                    reload.update(|n| *n += 1);
                }
                Err(e) => error.set(e.user_message(GENERIC_FAILURE)),
            }
        });
    };

    let on_report = move |student: Student| {
        let Some(session) = auth.current_untracked() else {
            return;
        };
        tasks.spawn(async move {
            match student_report_pdf(&GlooTransport, &session, &student.id).await {
                Ok(bytes) => {
                    if !download_bytes(&report_file_name(&student), PDF_MIME, &bytes) {
                        error.set("Download failed.".to_owned());
                    }
                }
                Err(e) => error.set(e.user_message("Could not generate the report")),
            }
        });
    };

    let input = move |placeholder: &'static str, get: fn(&StudentInput) -> String, set: fn(&mut StudentInput, String)| {
        view! {
            <input
                class="dash-input"
                type="text"
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
        <section class="dash-card">
            <h2 class="dash-card__title">
                {move || if editing.get().is_some() { "Edit Student" } else { "Add Student" }}
            </h2>
            <form class="dash-form" on:submit=on_save>
                {input("Name", |f| f.name.clone(), |f, v| f.name = v)}
                {input("Roll No", |f| f.roll_no.clone(), |f, v| f.roll_no = v)}
                {input("Email", |f| f.email.clone(), |f, v| f.email = v)}
                {input("Class", |f| f.class_name.clone(), |f, v| f.class_name = v)}
                {input("Section", |f| f.section.clone(), |f, v| f.section = v)}
                <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                    "Save"
                </button>
                <Show when=move || editing.get().is_some()>
                    <button
                        class="btn"
                        type="button"
                        on:click=move |_| {
                            editing.set(None);
                            form.set(StudentInput::default());
                        }
                    >
                        "Cancel"
                    </button>
                </Show>
            </form>
            <div class="dash-card__toolbar">
                <input
                    class="dash-input"
                    type="file"
                    accept=".xlsx,.xls,.csv"
                    on:change=move |ev| on_file_selected(&ev, upload)
                />
                <button class="btn" on:click=on_import disabled=move || busy.get() || upload.with(Option::is_none)>
                    "Import Spreadsheet"
                </button>
                <input
                    class="dash-input dash-input--search"
                    type="search"
                    placeholder="Search students"
                    prop:value=move || search.get()
                    on:input=move |ev| search.set(event_target_value(&ev))
                />
            </div>
            <Notice error=error info=info />
            <table class="data-table">
                <thead>
                    <tr>
                        <th>"Roll No"</th>
                        <th>"Name"</th>
                        <th>"Class"</th>
                        <th>"Email"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <For each=move || visible.get() key=|s| s.id.clone() let:student>
                        {
                            let edit_target = student.clone();
                            let report_target = student.clone();
                            let delete_id = student.id.clone();
                            view! {
                                <tr>
                                    <td>{student.roll_no.clone()}</td>
                                    <td>{student.name.clone()}</td>
                                    <td>{format!("{} {}", student.class_name, student.section)}</td>
                                    <td>{student.email.clone()}</td>
                                    <td class="data-table__actions">
                                        <button
                                            class="btn btn--small"
                                            on:click=move |_| {
                                                form.set(StudentInput::from(&edit_target));
                                                editing.set(Some(edit_target.id.clone()));
                                            }
                                        >
                                            "Edit"
                                        </button>
                                        <button class="btn btn--small" on:click=move |_| on_report(report_target.clone())>
                                            "PDF"
                                        </button>
                                        <button
                                            class="btn btn--small btn--danger"
                                            on:click=move |_| on_delete(delete_id.clone())
                                        >
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
