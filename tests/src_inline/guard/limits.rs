use super::*;

#[test]
fn test_limit_is_inclusive() {
    assert!(enforce_size_limit(0, 500).is_ok());
    assert!(enforce_size_limit(500, 500).is_ok());
}

#[test]
fn test_over_limit_rejected() {
    let err = enforce_size_limit(501, 500).unwrap_err();
    assert!(matches!(err, GuardError::LimitExceeded { count: 501, max: 500 }));
    assert_eq!(err.status(), 413);
    assert_eq!(err.public_message(), "Too many variants (max 500)");
}
