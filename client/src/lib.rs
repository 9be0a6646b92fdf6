//! # client
//!
//! Leptos + WASM frontend for Writify.
//!
//! This crate wires the `authstate` reconciliation core to the browser:
//! web-sys storage and cookies, location navigation, gloo timers and the
//! gloo-net status oracle. It also holds the route table, the auth-aware
//! pages, and the header with sign-out and the theme toggle.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: installs logging and hydrates the server-rendered body.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
