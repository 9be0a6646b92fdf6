use super::*;

fn policy() -> DomainPolicy {
    DomainPolicy::new("@student.iul.ac.in")
}

fn identity(email: &str) -> Identity {
    Identity { email: Some(email.to_owned()), ..Identity::default() }
}

// =============================================================
// AuthStatus
// =============================================================

#[test]
fn auth_status_defaults_to_unknown() {
    assert_eq!(AuthStatus::default(), AuthStatus::Unknown);
    assert!(!AuthStatus::Unknown.is_resolved());
    assert!(AuthStatus::Unauthenticated.is_resolved());
    assert!(AuthStatus::Authenticated.is_authenticated());
}

// =============================================================
// DomainPolicy
// =============================================================

#[test]
fn allows_matching_domain_case_insensitively() {
    assert!(policy().allows("x@student.iul.ac.in"));
    assert!(policy().allows("Jane.Doe@STUDENT.IUL.AC.IN"));
}

#[test]
fn rejects_other_domains_and_lookalikes() {
    assert!(!policy().allows("x@gmail.com"));
    assert!(!policy().allows("x@iul.ac.in"));
    assert!(!policy().allows("x@student.iul.ac.in.evil.com"));
    assert!(!policy().allows("@student.iul.ac.in"));
}

#[test]
fn evaluate_not_authenticated() {
    let response = StatusResponse { is_authenticated: false, user: None };
    assert_eq!(policy().evaluate(response), Verdict::NotAuthenticated);
}

#[test]
fn evaluate_valid_student() {
    let user = identity("x@student.iul.ac.in");
    let response = StatusResponse { is_authenticated: true, user: Some(user.clone()) };
    assert_eq!(policy().evaluate(response), Verdict::Authenticated(Some(user)));
}

#[test]
fn evaluate_rejects_foreign_domain() {
    let response = StatusResponse { is_authenticated: true, user: Some(identity("x@gmail.com")) };
    assert_eq!(
        policy().evaluate(response),
        Verdict::DomainRejected { email: "x@gmail.com".to_owned() }
    );
}

#[test]
fn evaluate_ignores_email_when_not_authenticated() {
    let response = StatusResponse { is_authenticated: false, user: Some(identity("x@gmail.com")) };
    assert_eq!(policy().evaluate(response), Verdict::NotAuthenticated);
}

// =============================================================
// Wire format
// =============================================================

#[test]
fn status_response_decodes_camel_case_and_ignores_extra_fields() {
    let raw = r#"{"isAuthenticated":true,"user":{"email":"a@student.iul.ac.in","displayName":"A","role":"writer","id":7}}"#;
    let decoded: StatusResponse = serde_json::from_str(raw).unwrap();
    assert!(decoded.is_authenticated);
    let user = decoded.user.unwrap();
    assert_eq!(user.email.as_deref(), Some("a@student.iul.ac.in"));
    assert_eq!(user.label(), "A");
}

#[test]
fn status_response_without_user() {
    let decoded: StatusResponse = serde_json::from_str(r#"{"isAuthenticated":false}"#).unwrap();
    assert_eq!(decoded, StatusResponse { is_authenticated: false, user: None });
}

#[test]
fn identity_label_falls_back_to_email_then_default() {
    assert_eq!(identity("a@student.iul.ac.in").label(), "a@student.iul.ac.in");
    assert_eq!(Identity::default().label(), "Student");
}
