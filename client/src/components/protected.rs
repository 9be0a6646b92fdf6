//! Route guard wrapper.
//!
//! SYSTEM CONTEXT
//! ==============
//! `Guarded` classifies the current location, asks `authstate::guard` what to
//! do for the published status, and renders children, a loading affordance,
//! or nothing while it redirects.

use authstate::{Guard, SessionContext, guard};
use leptos::prelude::*;
use leptos_router::hooks::{use_location, use_navigate};

use crate::state::auth::AuthState;
use crate::util::auth::install_guard_redirect;

#[component]
pub fn Guarded(children: ChildrenFn) -> impl IntoView {
    let session = expect_context::<SessionContext>();
    let auth = expect_context::<RwSignal<AuthState>>();
    let location = use_location();

    let decision = Memo::new(move |_| {
        let view = session.view_for(&location.pathname.get(), &location.search.get());
        guard(&view, auth.get().status)
    });
    install_guard_redirect(decision, use_navigate());

    move || match decision.get() {
        Guard::Render => children().into_any(),
        Guard::Loading => view! {
            <div class="auth-loading" aria-busy="true">
                <span class="auth-loading__spinner"></span>
                <p>"Loading..."</p>
            </div>
        }
        .into_any(),
        Guard::Redirect(_) => ().into_any(),
    }
}

/// `/` and unknown paths: loading, then a redirect by status.
#[component]
pub fn RootRedirect() -> impl IntoView {
    view! {
        <Guarded>
            <span class="root-redirect"></span>
        </Guarded>
    }
}
