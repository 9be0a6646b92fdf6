#![cfg(not(feature = "hydrate"))]

use authstate::{AuthStatus, Navigator, View};

use super::*;

#[test]
fn storage_is_unavailable_off_browser() {
    let store = BrowserStorage::new(Scope::Durable);
    assert!(matches!(store.get("FORCE_LOGOUT"), Err(StorageError::Unavailable(_))));
    assert!(matches!(store.set("FORCE_LOGOUT", "1"), Err(StorageError::Unavailable(_))));
    assert!(matches!(store.clear(), Err(StorageError::Unavailable(_))));
}

#[test]
fn cookies_and_navigation_are_unavailable_off_browser() {
    assert!(DocumentCookies.cookie_string().is_err());
    assert!(DocumentCookies.write("a=; path=/").is_err());
    assert!(LocationNavigator.redirect("/login").is_err());
    assert_eq!(current_hostname(), "");
}

#[test]
fn clock_reports_epoch_millis() {
    assert!(BrowserClock.now_millis() > 1_600_000_000_000);
}

#[test]
fn session_context_knows_protected_views() {
    let session = session_context();
    assert!(session.config.endpoints.status.ends_with("/auth/status"));
    assert_eq!(session.view_for("/profile", ""), View::Protected("/profile".to_owned()));
    assert_eq!(session.store.status(), AuthStatus::Unknown);
}

#[test]
fn logout_off_browser_degrades_without_panicking() {
    let session = session_context();
    assert!(!session.store.has_logout_intent());
    session.store.scrub_all(true);
    assert_eq!(session.store.scrub_cookies(), 0);
}
