//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns from page and component
//! logic. `browser` holds every web-sys binding the reconciliation core needs.

pub mod auth;
pub mod browser;
pub mod dark_mode;
