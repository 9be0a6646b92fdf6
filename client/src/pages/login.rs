//! Login page: Google sign-in restricted to the university domain.
//!
//! SYSTEM CONTEXT
//! ==============
//! The query-parameter side effects (`force=true`, `error=unauthorized`) run
//! in the app's navigation hook; this page only renders the banner they
//! leave in `AuthState` and starts the OAuth redirect.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use authstate::SessionContext;
use leptos::prelude::*;

use crate::components::protected::Guarded;
use crate::state::auth::AuthState;

fn sign_in_label(busy: bool) -> &'static str {
    if busy { "Redirecting..." } else { "Sign in with Google" }
}

fn sign_in_hint(suffix: &str) -> String {
    format!("Use your university account ending in {suffix}.")
}

#[component]
pub fn LoginPage() -> impl IntoView {
    view! {
        <Guarded>
            <LoginCard/>
        </Guarded>
    }
}

#[component]
fn LoginCard() -> impl IntoView {
    let session = expect_context::<SessionContext>();
    let auth = expect_context::<RwSignal<AuthState>>();
    let busy = RwSignal::new(false);
    let hint = sign_in_hint(session.config.policy.suffix());

    let on_sign_in = move |_| {
        if busy.get_untracked() {
            return;
        }
        busy.set(true);
        #[cfg(feature = "hydrate")]
        {
            let session = session.clone();
            leptos::task::spawn_local(async move {
                if let Err(e) = session.reconciler.begin_login().await {
                    leptos::logging::warn!("login redirect failed: {e}");
                    auth.update(|a| a.banner = Some(authstate::LOGIN_FAILED_MESSAGE.to_owned()));
                    busy.set(false);
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = &session;
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Writify"</h1>
                <p class="login-card__subtitle">"Student writing marketplace"</p>
                <Show when=move || auth.get().banner.is_some()>
                    <p class="login-message login-message--error" role="alert">
                        {move || auth.get().banner.unwrap_or_default()}
                    </p>
                </Show>
                <button class="login-button" on:click=on_sign_in disabled=move || busy.get()>
                    {move || sign_in_label(busy.get())}
                </button>
                <p class="login-card__hint">{hint}</p>
            </div>
        </div>
    }
}
