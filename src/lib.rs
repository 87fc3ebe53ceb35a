//! # krishi-client
//!
//! Leptos + WASM frontend for Krishi, a farmer-facing marketplace.
//! This crate implements the authentication screen: a phone-first
//! login/signup form backed by a shared authentication state holder
//! that delegates credential handling to a managed identity service.
//!
//! The crate contains pages, components, application state, and the
//! network boundary (identity-service client + profile lookup).

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Browser entry point: hydrate the server-rendered document.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::hydrate_body(app::App);
}
