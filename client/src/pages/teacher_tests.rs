//! Quiz authoring, publishing and results for teachers.
//!
//! SYSTEM CONTEXT
//! ==============
//! The backend calls these "tests". A quiz is created or edited through a
//! `QuizDraft`, stays invisible to students until published, and can be
//! opened to list every student's submitted score.

#[cfg(test)]
#[path = "teacher_tests_test.rs"]
mod teacher_tests_test;

use leptos::prelude::*;

use crate::components::dashboard_layout::DashboardLayout;
use crate::components::data_table::DataTable;
use crate::components::notice::Notice;
use crate::net::marks::format_score;
use crate::net::quiz::{create_quiz, delete_quiz, list_quizzes, publish_quiz, quiz_results, results_table, update_quiz};
use crate::net::request::{GENERIC_FAILURE, GlooTransport};
use crate::net::types::{Quiz, QuizResult};
use crate::state::quiz::QuizDraft;
use crate::state::session::{AuthContext, Role};
use crate::util::task::TaskScope;

pub fn quiz_status(quiz: &Quiz) -> &'static str {
    if quiz.published { "Published" } else { "Draft" }
}

pub fn quiz_summary(quiz: &Quiz) -> String {
    let marks: f64 = quiz.questions.iter().map(|q| q.marks).sum();
    format!(
        "{} question(s) · {} marks · {} min",
        quiz.questions.len(),
        format_score(marks),
        quiz.duration_minutes
    )
}

#[component]
pub fn TeacherTestsPage() -> impl IntoView {
    view! {
        <DashboardLayout role=Role::Teacher title="Tests">
            <QuizWorkspace />
        </DashboardLayout>
    }
}

#[component]
fn QuizWorkspace() -> impl IntoView {
    let auth = expect_context::<AuthContext>();
    let tasks = TaskScope::new();
    let quizzes = RwSignal::new(Vec::<Quiz>::new());
    let draft = RwSignal::new(None::<QuizDraft>);
    let results = RwSignal::new(None::<(String, Vec<QuizResult>)>);
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
            match list_quizzes(&GlooTransport, &session).await {
                Ok(list) => quizzes.set(list),
                Err(e) => error.set(e.user_message(GENERIC_FAILURE)),
            }
        });
    });

    let on_save = move |()| {
        if busy.get() {
            return;
        }
        let Some(session) = auth.current_untracked() else {
            return;
        };
        let Some(current) = draft.get_untracked() else {
            return;
        };
        let input = match current.to_input() {
            Ok(i) => i,
            Err(msg) => {
                error.set(msg);
                return;
            }
        };
        error.set(String::new());
        busy.set(true);
        tasks.spawn(async move {
            let result = match &current.editing_id {
                Some(id) => update_quiz(&GlooTransport, &session, id, &input).await,
                None => create_quiz(&GlooTransport, &session, &input).await,
            };
            match result {
                Ok(()) => {
                    info.set(format!("Saved \"{}\".", input.title));
                    draft.set(None);
                    reload.update(|n| *n += 1);
                }
                Err(e) => error.set(e.user_message("Could not save the test")),
            }
            busy.set(false);
        });
    };

    let on_publish = move |id: String| {
        let Some(session) = auth.current_untracked() else {
            return;
        };
        tasks.spawn(async move {
            match publish_quiz(&GlooTransport, &session, &id).await {
                Ok(()) => {
                    info.set("Test published.".to_owned());
                    reload.update(|n| *n += 1);
                }
                Err(e) => error.set(e.user_message(GENERIC_FAILURE)),
            }
        });
    };

    let on_delete = move |id: String| {
        let Some(session) = auth.current_untracked() else {
            return;
        };
        tasks.spawn(async move {
            match delete_quiz(&GlooTransport, &session, &id).await {
                Ok(()) => {
                    info.set("Test deleted.".to_owned());
                    reload.update(|n| *n += 1);
                }
                Err(e) => error.set(e.user_message(GENERIC_FAILURE)),
            }
        });
    };

    let on_results = move |quiz: Quiz| {
        let Some(session) = auth.current_untracked() else {
            return;
        };
        tasks.spawn(async move {
            match quiz_results(&GlooTransport, &session, &quiz.id).await {
                Ok(list) => results.set(Some((quiz.title, list))),
                Err(e) => error.set(e.user_message(GENERIC_FAILURE)),
            }
        });
    };

    view! {
        <section class="dash-card">
            <div class="dash-card__toolbar">
                <h2 class="dash-card__title">"Your Tests"</h2>
                <button class="btn btn--primary" on:click=move |_| draft.set(Some(QuizDraft::default()))>
                    "New Test"
                </button>
            </div>
            <Notice error=error info=info />
            <table class="data-table">
                <tbody>
                    <For each=move || quizzes.get() key=|q| (q.id.clone(), q.published) let:quiz>
                        {
                            let edit_target = quiz.clone();
                            let results_target = quiz.clone();
                            let publish_id = quiz.id.clone();
                            let delete_id = quiz.id.clone();
                            let published = quiz.published;
                            view! {
                                <tr>
                                    <td>{quiz.title.clone()}</td>
                                    <td>{quiz.subject.clone()}</td>
                                    <td>{quiz_summary(&quiz)}</td>
                                    <td>{quiz_status(&quiz)}</td>
                                    <td class="data-table__actions">
                                        <button
                                            class="btn btn--small"
                                            on:click=move |_| draft.set(Some(QuizDraft::from_quiz(&edit_target)))
                                        >
                                            "Edit"
                                        </button>
                                        <Show when=move || !published>
                                            <button
                                                class="btn btn--small"
                                                on:click={
                                                    let id = publish_id.clone();
                                                    move |_| on_publish(id.clone())
                                                }
                                            >
                                                "Publish"
                                            </button>
                                        </Show>
                                        <button class="btn btn--small" on:click=move |_| on_results(results_target.clone())>
                                            "Results"
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
        <Show when=move || draft.with(Option::is_some)>
            <QuizEditor draft=draft busy=busy on_save=Callback::new(on_save) />
        </Show>
        <Show when=move || results.with(Option::is_some)>
            <section class="dash-card">
                <div class="dash-card__toolbar">
                    <h2 class="dash-card__title">
                        {move || results.with(|r| r.as_ref().map(|(title, _)| format!("Results: {title}")).unwrap_or_default())}
                    </h2>
                    <button class="btn" on:click=move |_| results.set(None)>"Close"</button>
                </div>
                {move || {
                    let (headers, rows) = results.with(|r| results_table(r.as_ref().map_or(&[][..], |(_, list)| list.as_slice())));
                    view! { <DataTable headers=headers rows=rows empty="No submissions yet." /> }
                }}
            </section>
        </Show>
    }
}

fn edit_draft(draft: RwSignal<Option<QuizDraft>>, f: impl FnOnce(&mut QuizDraft)) {
    draft.update(|d| {
        if let Some(d) = d.as_mut() {
            f(d);
        }
    });
}

/// Editor for the open draft. Text fields commit on `change`.
#[component]
fn QuizEditor(draft: RwSignal<Option<QuizDraft>>, busy: RwSignal<bool>, on_save: Callback<()>) -> impl IntoView {
    let questions_view = move || {
        let Some(current) = draft.get() else {
            return Vec::new();
        };
        current
            .questions
            .into_iter()
            .enumerate()
            .map(|(n, q)| {
                let key = q.key.clone();
                let options = q
                    .options
                    .iter()
                    .enumerate()
                    .map(|(i, option)| {
                        let (key_pick, key_text, key_remove) = (key.clone(), key.clone(), key.clone());
                        view! {
                            <li class="quiz-option">
                                <input
                                    type="radio"
                                    name=format!("correct-{key}")
                                    prop:checked={q.correct == Some(i)}
                                    on:change=move |_| edit_draft(draft, |d| {
                                        if let Some(q) = d.question_mut(&key_pick) {
                                            q.correct = Some(i);
                                        }
                                    })
                                />
                                <input
                                    class="dash-input"
                                    type="text"
                                    placeholder=format!("Option {}", i + 1)
                                    prop:value=option.clone()
                                    on:change=move |ev| {
                                        let value = event_target_value(&ev);
                                        edit_draft(draft, |d| {
                                            if let Some(q) = d.question_mut(&key_text) {
                                                if let Some(slot) = q.options.get_mut(i) {
                                                    slot.clone_from(&value);
                                                }
                                            }
                                        });
                                    }
                                />
                                <button
                                    class="btn btn--small"
                                    type="button"
                                    on:click=move |_| edit_draft(draft, |d| {
                                        if let Some(q) = d.question_mut(&key_remove) {
                                            q.remove_option(i);
                                        }
                                    })
                                >
                                    "x"
                                </button>
                            </li>
                        }
                    })
                    .collect::<Vec<_>>();
                let (key_text, key_marks, key_add, key_remove) = (key.clone(), key.clone(), key.clone(), key);
                view! {
                    <div class="quiz-question">
                        <div class="dash-form">
                            <span class="quiz-question__number">{format!("Q{}", n + 1)}</span>
                            <input
                                class="dash-input quiz-question__text"
                                type="text"
                                placeholder="Question"
                                prop:value=q.text.clone()
                                on:change=move |ev| {
                                    let value = event_target_value(&ev);
                                    edit_draft(draft, |d| {
                                        if let Some(q) = d.question_mut(&key_text) {
                                            q.text.clone_from(&value);
                                        }
                                    });
                                }
                            />
                            <input
                                class="dash-input dash-input--narrow"
                                type="number"
                                min="0"
                                title="Marks"
                                prop:value=format_score(q.marks)
                                on:change=move |ev| {
                                    let marks = event_target_value(&ev).trim().parse::<f64>().unwrap_or(0.0);
                                    edit_draft(draft, |d| {
                                        if let Some(q) = d.question_mut(&key_marks) {
                                            q.marks = marks;
                                        }
                                    });
                                }
                            />
                            <button
                                class="btn btn--small btn--danger"
                                type="button"
                                on:click=move |_| edit_draft(draft, |d| d.remove_question(&key_remove))
                            >
                                "Remove"
                            </button>
                        </div>
                        <ul class="quiz-options">{options}</ul>
                        <button
                            class="btn btn--small"
                            type="button"
                            on:click=move |_| edit_draft(draft, |d| {
                                if let Some(q) = d.question_mut(&key_add) {
                                    q.options.push(String::new());
                                }
                            })
                        >
                            "+ Option"
                        </button>
                    </div>
                }
            })
            .collect::<Vec<_>>()
    };

    let field = move |get: fn(&QuizDraft) -> String| move || draft.with(|d| d.as_ref().map(get).unwrap_or_default());

    view! {
        <section class="dash-card">
            <h2 class="dash-card__title">
                {move || if draft.with(|d| d.as_ref().is_some_and(|d| d.editing_id.is_some())) { "Edit Test" } else { "New Test" }}
            </h2>
            <div class="dash-form">
                <input
                    class="dash-input"
                    type="text"
                    placeholder="Title"
                    prop:value=field(|d| d.title.clone())
                    on:change=move |ev| {
                        let value = event_target_value(&ev);
                        edit_draft(draft, |d| d.title.clone_from(&value));
                    }
                />
                <input
                    class="dash-input"
                    type="text"
                    placeholder="Subject"
                    prop:value=field(|d| d.subject.clone())
                    on:change=move |ev| {
                        let value = event_target_value(&ev);
                        edit_draft(draft, |d| d.subject.clone_from(&value));
                    }
                />
                <input
                    class="dash-input dash-input--narrow"
                    type="number"
                    min="1"
                    title="Minutes"
                    prop:value=field(|d| d.duration_minutes.to_string())
                    on:change=move |ev| {
                        let minutes = event_target_value(&ev).trim().parse::<u32>().unwrap_or(0);
                        edit_draft(draft, |d| d.duration_minutes = minutes);
                    }
                />
                <span>{move || draft.with(|d| d.as_ref().map(|d| format!("{} marks", format_score(d.total_marks()))).unwrap_or_default())}</span>
            </div>
            {questions_view}
            <div class="dash-card__toolbar">
                <button class="btn" type="button" on:click=move |_| edit_draft(draft, QuizDraft::add_question)>
                    "+ Question"
                </button>
                <button class="btn" type="button" on:click=move |_| draft.set(None)>
                    "Cancel"
                </button>
                <button class="btn btn--primary" type="button" on:click=move |_| on_save.run(()) disabled=move || busy.get()>
                    "Save Test"
                </button>
            </div>
        </section>
    }
}
