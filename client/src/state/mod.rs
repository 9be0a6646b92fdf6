//! Reactive client state provided through Leptos context.
//!
//! SYSTEM CONTEXT
//! ==============
//! `auth` mirrors the reconciler's published status for rendering; `ui` holds
//! presentation-only flags.

pub mod auth;
pub mod ui;
