//! Root application component with routing and context providers.
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` builds the single `SessionContext` for the page and provides it,
//! together with the reactive `AuthState`, to every route. The store's
//! publish hook is the only writer of `AuthState::status`.
//!
//! `SessionBootstrap` runs the startup reconciliation once per page load and
//! the view-entry side effects on every navigation after that.

use authstate::SessionContext;
use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
    hooks::use_location,
};

use crate::components::protected::RootRedirect;
use crate::pages::{
    account_deleted::AccountDeletedPage, dashboard::DashboardPage, login::LoginPage, profile::ProfilePage,
};
use crate::state::{auth::AuthState, ui::UiState};
use crate::util::browser::session_context;

/// Views that render only for an authenticated session.
pub const PROTECTED_PATHS: [&str; 2] = ["/dashboard", "/profile"];

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let session = session_context();
    let auth = RwSignal::new(AuthState::default());
    let ui = RwSignal::new(UiState::default());

    session.store.subscribe(move |status| auth.update(|a| a.apply_status(status)));

    provide_context(session);
    provide_context(auth);
    provide_context(ui);

    // Effects never run during SSR, so the stored theme is read on the client only.
    Effect::new(move || {
        let enabled = crate::util::dark_mode::read_preference();
        crate::util::dark_mode::apply(enabled);
        ui.update(|u| u.dark_mode = enabled);
    });

    view! {
        <Stylesheet id="leptos" href="/pkg/writify.css"/>
        <Title text="Writify"/>

        <Router>
            <SessionBootstrap/>
            <Routes fallback=|| view! { <RootRedirect/> }>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=StaticSegment("account-deleted") view=AccountDeletedPage/>
                <Route path=StaticSegment("dashboard") view=DashboardPage/>
                <Route path=StaticSegment("profile") view=ProfilePage/>
                <Route path=StaticSegment("") view=RootRedirect/>
            </Routes>
        </Router>
    }
}

/// Drives the reconciler from the router location. Renders nothing.
#[component]
fn SessionBootstrap() -> impl IntoView {
    let session = expect_context::<SessionContext>();
    let auth = expect_context::<RwSignal<AuthState>>();
    let location = use_location();

    #[cfg(feature = "hydrate")]
    {
        let initial = session.view_for(&location.pathname.get_untracked(), &location.search.get_untracked());
        let startup = session.clone();
        leptos::task::spawn_local(async move {
            let resolution = startup.reconciler.reconcile(&initial).await;
            let banner = startup.reconciler.enter_view(&initial);
            auth.update(|a| {
                a.set_identity(resolution.identity);
                a.banner = banner.map(str::to_owned);
            });
        });
    }

    // First run only subscribes; the startup task handles the initial view.
    Effect::new(move |previous: Option<()>| {
        let path = location.pathname.get();
        let query = location.search.get();
        if previous.is_none() {
            return;
        }
        let view = session.view_for(&path, &query);
        let banner = session.reconciler.enter_view(&view);
        auth.update(|a| a.banner = banner.map(str::to_owned));
    });
}
