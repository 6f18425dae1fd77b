//! Public landing page and contact form.

#[cfg(test)]
#[path = "home_test.rs"]
mod home_test;

use leptos::prelude::*;

use crate::components::notice::Notice;
use crate::net::contact::send_contact;
use crate::net::request::GlooTransport;
use crate::net::types::ContactMessage;
use crate::pages::password::validate_email;
use crate::state::session::Role;
use crate::util::task::TaskScope;

const CONTACT_SENT: &str = "Thanks! We'll get back to you soon.";

pub fn validate_contact(name: &str, email: &str, message: &str) -> Result<ContactMessage, &'static str> {
    let name = name.trim();
    let message = message.trim();
    if name.is_empty() || message.is_empty() {
        return Err("Please fill in every field.");
    }
    let email = validate_email(email)?;
    Ok(ContactMessage { name: name.to_owned(), email, message: message.to_owned() })
}

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <div class="home-page">
            <header class="home-page__hero">
                <h1>"Gradyze"</h1>
                <p>"Marks, attendance and tests for your whole school in one place."</p>
            </header>
            <section class="home-page__roles">
                {Role::ALL
                    .into_iter()
                    .map(|role| {
                        view! {
                            <a class="home-page__role-card" href=role.login_path()>
                                {format!("{} Login", role.label())}
                            </a>
                        }
                    })
                    .collect::<Vec<_>>()}
            </section>
            <ContactForm />
        </div>
    }
}

#[component]
pub fn ContactPage() -> impl IntoView {
    view! {
        <div class="home-page">
            <a class="home-page__back" href="/">"Back to home"</a>
            <ContactForm />
        </div>
    }
}

#[component]
fn ContactForm() -> impl IntoView {
    let tasks = TaskScope::new();
    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let message = RwSignal::new(String::new());
    let error = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let body = match validate_contact(&name.get(), &email.get(), &message.get()) {
            Ok(b) => b,
            Err(msg) => {
                error.set(msg.to_owned());
                return;
            }
        };
        error.set(String::new());
        info.set(String::new());
        busy.set(true);
        tasks.spawn(async move {
            match send_contact(&GlooTransport, &body).await {
                Ok(reply) => {
                    info.set(reply.unwrap_or_else(|| CONTACT_SENT.to_owned()));
                    name.set(String::new());
                    email.set(String::new());
                    message.set(String::new());
                }
                Err(e) => error.set(e.user_message("Could not send your message")),
            }
            busy.set(false);
        });
    };

    view! {
        <section class="contact-form">
            <h2>"Contact Us"</h2>
            <form class="login-form" on:submit=on_submit>
                <input
                    class="login-input"
                    type="text"
                    placeholder="Name"
                    prop:value=move || name.get()
                    on:input=move |ev| name.set(event_target_value(&ev))
                />
                <input
                    class="login-input"
                    type="email"
                    placeholder="Email"
                    prop:value=move || email.get()
                    on:input=move |ev| email.set(event_target_value(&ev))
                />
                <textarea
                    class="login-input contact-form__message"
                    placeholder="How can we help?"
                    prop:value=move || message.get()
                    on:input=move |ev| message.set(event_target_value(&ev))
                ></textarea>
                <button class="login-button" type="submit" disabled=move || busy.get()>
                    "Send"
                </button>
            </form>
            <Notice error=error info=info />
        </section>
    }
}
