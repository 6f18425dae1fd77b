//! Inline error / info line shared by every form.

use leptos::prelude::*;

/// Shows `error` when non-empty, otherwise `info` when provided and non-empty.
#[component]
pub fn Notice(error: RwSignal<String>, #[prop(optional)] info: Option<RwSignal<String>>) -> impl IntoView {
    let info_text = move || info.map(|s| s.get()).unwrap_or_default();
    view! {
        <Show when=move || !error.get().is_empty()>
            <p class="notice notice--error" role="alert">{move || error.get()}</p>
        </Show>
        <Show when=move || error.get().is_empty() && !info_text().is_empty()>
            <p class="notice notice--info">{info_text}</p>
        </Show>
    }
}
