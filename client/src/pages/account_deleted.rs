//! Confirmation shown after the account was deleted.
//!
//! Entering this view clears logout intents and scrubs cookies (see
//! `AuthReconciler::enter_view`); the page itself is static and renders for
//! every status.

use leptos::prelude::*;

use crate::components::protected::Guarded;

#[component]
pub fn AccountDeletedPage() -> impl IntoView {
    view! {
        <Guarded>
            <div class="account-deleted-page">
                <div class="login-card">
                    <h1>"Account deleted"</h1>
                    <p>"Your account and its data have been removed."</p>
                    <a href="/login" class="login-button">
                        "Return to login"
                    </a>
                </div>
            </div>
        </Guarded>
    }
}
