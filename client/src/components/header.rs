//! Top bar with navigation, theme toggle, identity, and Sign Out.
//!
//! SYSTEM CONTEXT
//! ==============
//! Shown on authenticated views. Sign Out runs the reconciler's logout
//! protocol, which ends in a full navigation to the login entry point.

use authstate::SessionContext;
use leptos::prelude::*;

use crate::state::auth::AuthState;
use crate::state::ui::UiState;

#[component]
pub fn Header() -> impl IntoView {
    let session = expect_context::<SessionContext>();
    let auth = expect_context::<RwSignal<AuthState>>();
    let ui = expect_context::<RwSignal<UiState>>();

    let on_sign_out = move |_| {
        if ui.get_untracked().signing_out {
            return;
        }
        ui.update(|u| u.signing_out = true);
        #[cfg(feature = "hydrate")]
        {
            let session = session.clone();
            leptos::task::spawn_local(async move {
                let outcome = session.reconciler.logout().await;
                if !outcome.navigated {
                    leptos::logging::warn!("logout navigation to {} failed", outcome.target);
                    ui.update(|u| u.signing_out = false);
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = &session;
        }
    };

    view! {
        <header class="app-header">
            <a href="/dashboard" class="app-header__brand">
                "Writify"
            </a>
            <nav class="app-header__nav">
                <a href="/dashboard">"Dashboard"</a>
                <a href="/profile">"Profile"</a>
            </nav>

            <span class="app-header__spacer"></span>

            <button
                class="btn app-header__theme"
                on:click=move |_| {
                    let current = ui.get().dark_mode;
                    let next = crate::util::dark_mode::toggle(current);
                    ui.update(|u| u.dark_mode = next);
                }
                title="Toggle dark mode"
            >
                {move || if ui.get().dark_mode { "☀" } else { "☾" }}
            </button>

            <span class="app-header__self">{move || auth.get().display_name()}</span>

            <button
                class="btn app-header__sign-out"
                on:click=on_sign_out
                disabled=move || ui.get().signing_out
            >
                {move || if ui.get().signing_out { "Signing out..." } else { "Sign Out" }}
            </button>
        </header>
    }
}
