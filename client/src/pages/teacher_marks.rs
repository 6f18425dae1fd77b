//! Marks entry for teachers.
//!
//! SYSTEM CONTEXT
//! ==============
//! The teacher picks a class, subject and exam, loads the class roster into
//! a `MarksGrid`, and types per-question scores. Scores already submitted for
//! the same subject and exam are loaded into the grid and listed below it,
//! where single records can be deleted and the sheet exported as Excel, CSV or PDF.
//!
//! Score cells commit on `change` (blur/enter) so re-rendering the grid never
//! steals focus mid-keystroke.

#[cfg(test)]
#[path = "teacher_marks_test.rs"]
mod teacher_marks_test;

use leptos::prelude::*;
use leptos::tachys::view::any_view::IntoAny;

use crate::components::dashboard_layout::DashboardLayout;
use crate::components::data_table::DataTable;
use crate::components::notice::Notice;
use crate::net::marks::{class_students, delete_mark, export_marks_pdf, format_score, list_marks, marks_table, submit_marks};
use crate::net::request::{GENERIC_FAILURE, GlooTransport};
use crate::net::types::MarkRecord;
use crate::state::marks_grid::MarksGrid;
use crate::state::session::{AuthContext, Role};
use crate::util::export::{ExportFormat, export_table};
use crate::util::download::{PDF_MIME, download_bytes};
use crate::util::task::TaskScope;

pub const DEFAULT_QUESTIONS: usize = 5;

/// Parse the question-count box; anything unusable keeps `current`.
pub fn parse_question_count(raw: &str, current: usize) -> usize {
    raw.trim().parse::<usize>().ok().filter(|n| *n > 0).unwrap_or(current)
}

pub fn sheet_label(subject: &str, exam: &str) -> String {
    [subject.trim(), exam.trim()].iter().filter(|s| !s.is_empty()).copied().collect::<Vec<_>>().join(" ")
}

#[component]
pub fn TeacherMarksPage() -> impl IntoView {
    view! {
        <DashboardLayout role=Role::Teacher title="Marks Entry">
            <MarksWorkspace />
        </DashboardLayout>
    }
}

#[component]
fn MarksWorkspace() -> impl IntoView {
    let auth = expect_context::<AuthContext>();
    let tasks = TaskScope::new();
    let class_name = RwSignal::new(String::new());
    let grid = RwSignal::new(MarksGrid::new(&[], DEFAULT_QUESTIONS));
    let records = RwSignal::new(Vec::<MarkRecord>::new());
    let error = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let refresh_records = move || {
        let Some(session) = auth.current_untracked() else {
            return;
        };
        let (subject, exam) = grid.with_untracked(|g| (g.subject.clone(), g.exam.clone()));
        tasks.spawn(async move {
            match list_marks(&GlooTransport, &session, &subject, &exam).await {
                Ok(list) => {
                    grid.update(|g| g.prefill(&list));
                    records.set(list);
                }
                Err(e) => error.set(e.user_message(GENERIC_FAILURE)),
            }
        });
    };

    let on_load = move |_| {
        let Some(session) = auth.current_untracked() else {
            return;
        };
        error.set(String::new());
        busy.set(true);
        let class_value = class_name.get_untracked();
        tasks.spawn(async move {
            match class_students(&GlooTransport, &session, &class_value).await {
                Ok(students) => {
                    grid.update(|g| {
                        let mut fresh = MarksGrid::new(&students, g.question_count());
                        fresh.subject = std::mem::take(&mut g.subject);
                        fresh.exam = std::mem::take(&mut g.exam);
                        fresh.max_marks.clone_from(&g.max_marks);
                        *g = fresh;
                    });
                    if students.is_empty() {
                        info.set("No students found for this class.".to_owned());
                    }
                    refresh_records();
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
        let body = match grid.with_untracked(MarksGrid::submission) {
            Ok(b) => b,
            Err(msg) => {
                error.set(msg.to_owned());
                return;
            }
        };
        error.set(String::new());
        busy.set(true);
        tasks.spawn(async move {
            match submit_marks(&GlooTransport, &session, &body).await {
                Ok(()) => {
                    info.set(format!("Saved marks for {} student(s).", body.entries.len()));
                    refresh_records();
                }
                Err(e) => error.set(e.user_message("Could not save marks")),
            }
            busy.set(false);
        });
    };

    let on_delete = move |id: String| {
        let Some(session) = auth.current_untracked() else {
            return;
        };
        tasks.spawn(async move {
            match delete_mark(&GlooTransport, &session, &id).await {
                Ok(()) => {
                    info.set("Record deleted.".to_owned());
                    refresh_records();
                }
                Err(e) => error.set(e.user_message(GENERIC_FAILURE)),
            }
        });
    };

    let on_export = move |format: ExportFormat| {
        let label = grid.with_untracked(|g| sheet_label(&g.subject, &g.exam));
        let (header, rows) = records.with_untracked(|r| marks_table(r));
        if let Err(e) = export_table(format, "marks", &label, &header, &rows) {
            error.set(e.user_message().to_owned());
        }
    };

    let on_export_pdf = move |_| {
        let Some(session) = auth.current_untracked() else {
            return;
        };
        let (subject, exam) = grid.with_untracked(|g| (g.subject.clone(), g.exam.clone()));
        tasks.spawn(async move {
            match export_marks_pdf(&GlooTransport, &session, &subject, &exam).await {
                Ok(bytes) => {
                    let name = format!("marks-{}.pdf", sheet_label(&subject, &exam).replace(' ', "-").to_lowercase());
                    if !download_bytes(&name, PDF_MIME, &bytes) {
                        error.set("Download failed.".to_owned());
                    }
                }
                Err(e) => error.set(e.user_message("Could not export PDF")),
            }
        });
    };

    let grid_view = move || {
        let g = grid.get();
        let count = g.question_count();
        let max_total = format_score(g.max_total());
        let max_cells = (0..count)
            .map(|q| {
                let max = format_score(g.max_marks[q]);
                view! {
                    <th>
                        {format!("Q{}", q + 1)}
                        <input
                            class="grid-input grid-input--max"
                            type="number"
                            min="0"
                            prop:value=max
                            on:change=move |ev| {
                                let raw = event_target_value(&ev);
                                let mut result = Ok(());
                                grid.update(|g| result = g.set_max(q, &raw));
                                error.set(result.err().map(|e| e.to_string()).unwrap_or_default());
                            }
                        />
                    </th>
                }
            })
            .collect::<Vec<_>>();
        let rows = g
            .rows
            .iter()
            .enumerate()
            .map(|(r, row)| {
                let cells = (0..count)
                    .map(|q| {
                        let value = row.scores[q].map(format_score).unwrap_or_default();
                        view! {
                            <td>
                                <input
                                    class="grid-input"
                                    type="number"
                                    min="0"
                                    prop:value=value
                                    on:change=move |ev| {
                                        let raw = event_target_value(&ev);
                                        let mut result = Ok(());
                                        grid.update(|g| result = g.set_score(r, q, &raw));
                                        error.set(result.err().map(|e| e.to_string()).unwrap_or_default());
                                    }
                                />
                            </td>
                        }
                    })
                    .collect::<Vec<_>>();
                view! {
                    <tr>
                        <td>{row.roll_no.clone()}</td>
                        <td>{row.name.clone()}</td>
                        {cells}
                        <td class="grid-total">{format!("{} / {}", format_score(row.total()), max_total)}</td>
                    </tr>
                }
            })
            .collect::<Vec<_>>();
        view! {
            <table class="data-table marks-grid">
                <thead>
                    <tr>
                        <th>"Roll No"</th>
                        <th>"Student"</th>
                        {max_cells}
                        <th>"Total"</th>
                    </tr>
                </thead>
                <tbody>{rows}</tbody>
            </table>
        }
    };

    view! {
        <section class="dash-card">
            <div class="dash-form">
                <input
                    class="dash-input"
                    type="text"
                    placeholder="Class (blank for all)"
                    prop:value=move || class_name.get()
                    on:input=move |ev| class_name.set(event_target_value(&ev))
                />
                <input
                    class="dash-input"
                    type="text"
                    placeholder="Subject"
                    prop:value=move || grid.with(|g| g.subject.clone())
                    on:change=move |ev| {
                        let value = event_target_value(&ev);
                        grid.update(|g| g.subject = value);
                    }
                />
                <input
                    class="dash-input"
                    type="text"
                    placeholder="Exam"
                    prop:value=move || grid.with(|g| g.exam.clone())
                    on:change=move |ev| {
                        let value = event_target_value(&ev);
                        grid.update(|g| g.exam = value);
                    }
                />
                <input
                    class="dash-input dash-input--narrow"
                    type="number"
                    min="1"
                    title="Questions"
                    prop:value=move || grid.with(MarksGrid::question_count).to_string()
                    on:change=move |ev| {
                        let raw = event_target_value(&ev);
                        grid.update(|g| {
                            let n = parse_question_count(&raw, g.question_count());
                            g.set_question_count(n);
                        });
                    }
                />
                <button class="btn" on:click=on_load disabled=move || busy.get()>
                    "Load Students"
                </button>
            </div>
            <Notice error=error info=info />
            <Show
                when=move || grid.with(|g| !g.rows.is_empty())
                fallback=|| view! { <p class="data-table__empty">"Load a class to start entering marks."</p> }
            >
                {grid_view}
                <div class="dash-card__toolbar">
                    <span>{move || format!("{} row(s) incomplete", grid.with(MarksGrid::incomplete_rows))}</span>
                    <button class="btn btn--primary" on:click=on_submit disabled=move || busy.get()>
                        "Submit Marks"
                    </button>
                </div>
            </Show>
        </section>
        <section class="dash-card">
            <div class="dash-card__toolbar">
                <h2 class="dash-card__title">"Submitted Records"</h2>
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
                <button class="btn" on:click=on_export_pdf disabled=move || records.with(Vec::is_empty)>
                    "Export PDF"
                </button>
            </div>
            {move || {
                let (headers, _) = marks_table(&[]);
                if records.with(Vec::is_empty) {
                    return view! { <DataTable headers=headers rows=Vec::new() empty="No records for this subject and exam." /> }
                        .into_any();
                }
                view! {
                    <table class="data-table">
                        <thead>
                            <tr>
                                {headers.into_iter().map(|h| view! { <th>{h}</th> }).collect::<Vec<_>>()}
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>
                            {records
                                .get()
                                .into_iter()
                                .map(|record| {
                                    let (_, mut rows) = marks_table(std::slice::from_ref(&record));
                                    let cells = rows.pop().unwrap_or_default();
                                    let id = record.id.clone();
                                    view! {
                                        <tr>
                                            {cells.into_iter().map(|c| view! { <td>{c}</td> }).collect::<Vec<_>>()}
                                            <td>
                                                <button
                                                    class="btn btn--small btn--danger"
                                                    on:click=move |_| on_delete(id.clone())
                                                >
                                                    "Delete"
                                                </button>
                                            </td>
                                        </tr>
                                    }
                                })
                                .collect::<Vec<_>>()}
                        </tbody>
                    </table>
                }
                .into_any()
            }}
        </section>
    }
}
