// Unit tests for AuthorizationGate

use sw_admin::auth::gate::AuthorizationGate;
use sw_admin::core::errors::AdminError;
use sw_admin::core::models::AuthorizationVerdict;

#[test]
fn test_only_allowed_passes() {
    assert!(AuthorizationGate::check(Some(AuthorizationVerdict::Allowed)).is_ok());
    assert!(matches!(
        AuthorizationGate::check(Some(AuthorizationVerdict::Denied)),
        Err(AdminError::Denied)
    ));
    assert!(matches!(
        AuthorizationGate::check(Some(AuthorizationVerdict::Unauthenticated)),
        Err(AdminError::Unauthenticated)
    ));
}

#[test]
fn test_missing_verdict_is_unauthenticated() {
    let err = AuthorizationGate::check(None).unwrap_err();
    assert_eq!(err.status_code(), 401);
    assert_eq!(err.user_message(), "Unauthorized");
}
