//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components read the shared `AuthState` and `SessionContext` from Leptos
//! context providers installed by `App`.

pub mod header;
pub mod protected;
