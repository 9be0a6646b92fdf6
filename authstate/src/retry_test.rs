use super::*;
use crate::test_support::InstantTimer;
use futures::FutureExt;
use futures::executor::block_on;

#[test]
fn default_policy_matches_status_check_budget() {
    let policy = RetryPolicy::default();
    assert_eq!(policy.max_retries, 2);
    assert_eq!(policy.max_attempts(), 3);
    assert_eq!(policy.backoff, Duration::from_secs(1));
    assert_eq!(policy.attempt_timeout, Duration::from_secs(5));
}

#[test]
fn retries_only_transient_failures_within_budget() {
    let policy = RetryPolicy::default();
    assert!(policy.should_retry(0, &OracleError::Timeout));
    assert!(policy.should_retry(1, &OracleError::Network("NetworkError".to_owned())));
    assert!(!policy.should_retry(2, &OracleError::Timeout));
    assert!(!policy.should_retry(0, &OracleError::Status { status: 500 }));
    assert!(!policy.should_retry(0, &OracleError::Malformed("eof".to_owned())));
}

#[test]
fn with_timeout_returns_ready_result() {
    let timer = InstantTimer::default();
    let result = block_on(with_timeout(
        &timer,
        Duration::from_secs(5),
        futures::future::ready(Ok::<_, OracleError>(7)).boxed_local(),
    ));
    assert_eq!(result, Ok(7));
    assert_eq!(timer.sleeps(), vec![Duration::from_secs(5)]);
}

#[test]
fn with_timeout_abandons_hung_request() {
    let timer = InstantTimer::default();
    let result: Result<u8, OracleError> = block_on(with_timeout(
        &timer,
        Duration::from_secs(5),
        futures::future::pending().boxed_local(),
    ));
    assert_eq!(result, Err(OracleError::Timeout));
}
