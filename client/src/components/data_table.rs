//! Read-only table for a header row plus string cells.

use leptos::prelude::*;
use leptos::tachys::view::any_view::IntoAny;

#[component]
pub fn DataTable(
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    #[prop(default = "Nothing to show yet.")] empty: &'static str,
) -> impl IntoView {
    if rows.is_empty() {
        return view! { <p class="data-table__empty">{empty}</p> }.into_any();
    }
    view! {
        <table class="data-table">
            <thead>
                <tr>{headers.into_iter().map(|h| view! { <th>{h}</th> }).collect::<Vec<_>>()}</tr>
            </thead>
            <tbody>
                {rows
                    .into_iter()
                    .map(|row| view! { <tr>{row.into_iter().map(|c| view! { <td>{c}</td> }).collect::<Vec<_>>()}</tr> })
                    .collect::<Vec<_>>()}
            </tbody>
        </table>
    }
    .into_any()
}
