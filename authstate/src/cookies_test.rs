use super::*;

#[test]
fn cookie_names_trims_and_dedupes() {
    let raw = "connect.sid=abc; theme=dark;  connect.sid=def ; =orphan; flag";
    assert_eq!(cookie_names(raw), vec!["connect.sid", "theme", "flag"]);
}

#[test]
fn cookie_names_empty_string() {
    assert!(cookie_names("").is_empty());
    assert!(cookie_names(" ; ").is_empty());
}

#[test]
fn domain_variants_for_www_subdomain() {
    assert_eq!(
        domain_variants("www.writify.example.com"),
        vec![
            Some("www.writify.example.com".to_owned()),
            Some("writify.example.com".to_owned()),
            Some("example.com".to_owned()),
            Some("localhost".to_owned()),
            None,
        ]
    );
}

#[test]
fn domain_variants_dedupes_short_hosts() {
    assert_eq!(domain_variants("localhost"), vec![Some("localhost".to_owned()), None]);
    assert_eq!(
        domain_variants("writify.app"),
        vec![Some("writify.app".to_owned()), Some("localhost".to_owned()), None]
    );
}

#[test]
fn domain_variants_without_host_still_tries_localhost() {
    assert_eq!(domain_variants(""), vec![Some("localhost".to_owned()), None]);
}

#[test]
fn plan_covers_domain_path_secure_cross_product() {
    let plan = ScrubPlan::for_host("www.writify.example.com");
    assert_eq!(plan.paths().len(), 5);
    assert_eq!(plan.directives_per_cookie(), 5 * 5 * 2);

    let directives = plan.directives("sid");
    assert_eq!(directives.len(), plan.directives_per_cookie());
    assert_eq!(directives[0], format!("sid=; expires={EXPIRED}; path=/; domain=www.writify.example.com"));
    assert_eq!(
        directives[1],
        format!("sid=; expires={EXPIRED}; path=/; domain=www.writify.example.com; secure")
    );
    assert!(directives.contains(&format!("sid=; expires={EXPIRED}; path=/api/auth; domain=example.com")));
    assert!(directives.contains(&format!("sid=; expires={EXPIRED}; path=/; domain=localhost; secure")));
    assert_eq!(directives.last().unwrap(), &format!("sid=; expires={EXPIRED}; secure"));
}

#[test]
fn plan_directives_are_unique() {
    let plan = ScrubPlan::for_host("www.writify.example.com");
    let mut directives = plan.directives("sid");
    let total = directives.len();
    directives.sort();
    directives.dedup();
    assert_eq!(directives.len(), total);
}
