//! # insight-client
//!
//! Leptos + WASM chat frontend for the Insight enterprise assistant.
//!
//! The page renders a single chat view: user questions are posted to the
//! `/query` endpoint and the answers, which may carry terminal color codes
//! and `[[source]]` references, are rendered as styled HTML.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: hydrates the server-rendered shell.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
