//! Dashboard: the authenticated landing view.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;

use crate::components::header::Header;
use crate::components::protected::Guarded;
use crate::state::auth::AuthState;

fn greeting(name: &str) -> String {
    format!("Welcome back, {name}")
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    view! {
        <Guarded>
            <DashboardContent/>
        </Guarded>
    }
}

#[component]
fn DashboardContent() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();

    view! {
        <Header/>
        <main class="dashboard-page">
            <h1>{move || greeting(&auth.get().display_name())}</h1>
            <section class="dashboard-page__cards">
                <a href="/profile" class="dashboard-card">
                    <h2>"Your profile"</h2>
                    <p>"Account details and settings"</p>
                </a>
            </section>
        </main>
    }
}
