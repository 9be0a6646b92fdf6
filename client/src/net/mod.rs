//! Networking modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` implements the status oracle and logout call for the reconciliation
//! core, plus the account deletion request used by the profile view.

pub mod api;
