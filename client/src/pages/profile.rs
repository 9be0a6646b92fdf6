//! Profile view with account deletion.
//!
//! SYSTEM CONTEXT
//! ==============
//! On a successful deletion the router moves to `/account-deleted`, whose
//! entry side effects sign the browser out. Failures stay on this page with
//! the backend's message.

#[cfg(test)]
#[path = "profile_test.rs"]
mod profile_test;

use authstate::SessionContext;
use leptos::prelude::*;

use crate::components::header::Header;
use crate::components::protected::Guarded;
use crate::state::auth::AuthState;

fn delete_label(confirming: bool, deleting: bool) -> &'static str {
    match (confirming, deleting) {
        (_, true) => "Deleting...",
        (true, false) => "Yes, delete my account",
        (false, false) => "Delete account",
    }
}

#[component]
pub fn ProfilePage() -> impl IntoView {
    view! {
        <Guarded>
            <ProfileContent/>
        </Guarded>
    }
}

#[component]
fn ProfileContent() -> impl IntoView {
    let session = expect_context::<SessionContext>();
    let auth = expect_context::<RwSignal<AuthState>>();
    let confirming = RwSignal::new(false);
    let deleting = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);
    #[cfg(feature = "hydrate")]
    let navigate = leptos_router::hooks::use_navigate();

    let on_delete = move |_| {
        if deleting.get_untracked() {
            return;
        }
        if !confirming.get_untracked() {
            confirming.set(true);
            return;
        }
        deleting.set(true);
        error.set(None);
        #[cfg(feature = "hydrate")]
        {
            let url = session.config.endpoints.delete_account.clone();
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                match crate::net::api::delete_account(&url).await {
                    Ok(()) => navigate("/account-deleted", leptos_router::NavigateOptions::default()),
                    Err(e) => {
                        leptos::logging::warn!("{e}");
                        error.set(Some(e.user_message()));
                        deleting.set(false);
                        confirming.set(false);
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = &session;
        }
    };

    view! {
        <Header/>
        <main class="profile-page">
            <h1>{move || auth.get().display_name()}</h1>
            <p class="profile-page__email">{move || auth.get().email().unwrap_or_default().to_owned()}</p>

            <section class="profile-page__danger">
                <h2>"Delete account"</h2>
                <p>"This permanently removes your profile, requests and ratings."</p>
                <Show when=move || error.get().is_some()>
                    <p class="profile-page__error" role="alert">
                        {move || error.get().unwrap_or_default()}
                    </p>
                </Show>
                <button
                    class="btn btn--danger"
                    on:click=on_delete
                    disabled=move || deleting.get()
                >
                    {move || delete_label(confirming.get(), deleting.get())}
                </button>
                <Show when=move || confirming.get() && !deleting.get()>
                    <button class="btn" on:click=move |_| confirming.set(false)>
                        "Cancel"
                    </button>
                </Show>
            </section>
        </main>
    }
}
