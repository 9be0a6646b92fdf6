//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page wraps its content in `Guarded`, so the route guard runs before
//! any page-specific state is created.

pub mod account_deleted;
pub mod dashboard;
pub mod login;
pub mod profile;
