use super::*;

#[test]
fn redirect_decision_yields_path() {
    assert_eq!(redirect_target(Guard::Redirect("/login")), Some("/login"));
}

#[test]
fn render_and_loading_do_not_navigate() {
    assert_eq!(redirect_target(Guard::Render), None);
    assert_eq!(redirect_target(Guard::Loading), None);
}
