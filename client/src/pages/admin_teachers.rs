//! Teacher accounts managed by the admin.

#[cfg(test)]
#[path = "admin_teachers_test.rs"]
mod admin_teachers_test;

use leptos::prelude::*;

use crate::components::dashboard_layout::DashboardLayout;
use crate::components::notice::Notice;
use crate::net::admin::{add_teacher, list_teachers, remove_teacher};
use crate::net::request::{GENERIC_FAILURE, GlooTransport};
use crate::net::types::{Teacher, TeacherInput};
use crate::pages::password::{MIN_PASSWORD_LEN, validate_email};
use crate::state::session::{AuthContext, Role};
use crate::util::task::TaskScope;

pub fn validate_teacher(input: &TeacherInput) -> Result<TeacherInput, &'static str> {
    let name = input.name.trim();
    let subject = input.subject.trim();
    if name.is_empty() || subject.is_empty() {
        return Err("Enter the teacher's name and subject.");
    }
    let email = validate_email(&input.email)?;
    if input.password.chars().count() < MIN_PASSWORD_LEN {
        return Err("Password must be at least 6 characters.");
    }
    Ok(TeacherInput { name: name.to_owned(), email, password: input.password.clone(), subject: subject.to_owned() })
}

#[component]
pub fn AdminTeachersPage() -> impl IntoView {
    view! {
        <DashboardLayout role=Role::Admin title="Teachers">
            <TeacherList />
        </DashboardLayout>
    }
}

#[component]
fn TeacherList() -> impl IntoView {
    let auth = expect_context::<AuthContext>();
    let tasks = TaskScope::new();
    let teachers = RwSignal::new(Vec::<Teacher>::new());
    let form = RwSignal::new(TeacherInput::default());
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
            match list_teachers(&GlooTransport, &session).await {
                Ok(list) => teachers.set(list),
                Err(e) => error.set(e.user_message(GENERIC_FAILURE)),
            }
        });
    });

    let on_add = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let Some(session) = auth.current_untracked() else {
            return;
        };
        let input = match validate_teacher(&form.get()) {
            Ok(i) => i,
            Err(msg) => {
                error.set(msg.to_owned());
                return;
            }
        };
        error.set(String::new());
        busy.set(true);
        tasks.spawn(async move {
            match add_teacher(&GlooTransport, &session, &input).await {
                Ok(()) => {
                    info.set(format!("Added {}.", input.name));
                    form.set(TeacherInput::default());
                    reload.update(|n| *n += 1);
                }
                Err(e) => error.set(e.user_message(GENERIC_FAILURE)),
            }
            busy.set(false);
        });
    };

    let on_remove = move |id: String| {
        let Some(session) = auth.current_untracked() else {
            return;
        };
        tasks.spawn(async move {
            match remove_teacher(&GlooTransport, &session, &id).await {
                Ok(()) => {
                    info.set("Teacher removed.".to_owned());
                    reload.update(|n| *n += 1);
                }
                Err(e) => error.set(e.user_message(GENERIC_FAILURE)),
            }
        });
    };

    let input = move |placeholder: &'static str,
                      kind: &'static str,
                      get: fn(&TeacherInput) -> String,
                      set: fn(&mut TeacherInput, String)| {
        view! {
            <input
                class="dash-input"
                type=kind
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
            <h2 class="dash-card__title">"Add Teacher"</h2>
            <form class="dash-form" on:submit=on_add>
                {input("Name", "text", |f| f.name.clone(), |f, v| f.name = v)}
                {input("Email", "email", |f| f.email.clone(), |f, v| f.email = v)}
                {input("Subject", "text", |f| f.subject.clone(), |f, v| f.subject = v)}
                {input("Temporary password", "password", |f| f.password.clone(), |f, v| f.password = v)}
                <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                    "Add"
                </button>
            </form>
            <Notice error=error info=info />
            <table class="data-table">
                <thead>
                    <tr>
                        <th>"Name"</th>
                        <th>"Email"</th>
                        <th>"Subject"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <For each=move || teachers.get() key=|t| t.id.clone() let:teacher>
                        {
                            let id = teacher.id.clone();
                            view! {
                                <tr>
                                    <td>{teacher.name}</td>
                                    <td>{teacher.email}</td>
                                    <td>{teacher.subject}</td>
                                    <td class="data-table__actions">
                                        <button class="btn btn--small btn--danger" on:click=move |_| on_remove(id.clone())>
                                            "Remove"
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
