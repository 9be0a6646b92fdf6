//! Shared route-guard helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every guarded view applies the same decision from `authstate::guard`;
//! this module turns that decision into a client-side navigation.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use authstate::Guard;
use leptos::prelude::*;
use leptos_router::NavigateOptions;

/// Path to navigate to for `decision`, if any.
pub fn redirect_target(decision: Guard) -> Option<&'static str> {
    match decision {
        Guard::Redirect(path) => Some(path),
        Guard::Render | Guard::Loading => None,
    }
}

/// Navigate whenever the guard decision becomes a redirect.
pub fn install_guard_redirect<F>(decision: Memo<Guard>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if let Some(path) = redirect_target(decision.get()) {
            navigate(path, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });
}
