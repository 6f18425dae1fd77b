//! # client
//!
//! Leptos front end for the Gradyze school-management backend.
//!
//! Pages for the three roles (admin, teacher, student) sit on top of a small
//! session layer (`state::session`), a typed request layer (`net`) and a few
//! browser helpers (`util`). The same crate renders on the server (`ssr`) and
//! hydrates in the browser (`hydrate`).

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        leptos::logging::warn!("console logger already set: {e}");
    }
    leptos::mount::hydrate_body(app::App);
}
