//! # trackweave-client
//!
//! Leptos + WASM frontend for the TrackWeave social posting platform
//! (users, posts, comments, votes).
//!
//! This crate contains pages, components, application state, the wire
//! schema, and the authenticated HTTP request layer with its single
//! 401 refresh-and-retry cycle.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install panic/log hooks and hydrate the server HTML.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::hydrate_body(app::App);
}
