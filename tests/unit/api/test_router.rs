// Unit tests for RequestRouter dispatch order

use axum::http::{HeaderMap, HeaderValue, Method};
use std::sync::Arc;

use sw_admin::api::router::{Dispatch, RequestRouter, Route, ADMIN_PATH, DELETE_TOKEN_HEADER};
use sw_admin::config::FeatureConfig;
use sw_admin::core::errors::AdminError;
use sw_admin::core::models::{AdminRequest, AuthorizationVerdict};

fn router(enabled: bool) -> RequestRouter {
    let feature = FeatureConfig::new(
        enabled,
        vec!["memory://local".to_string()],
        vec!["AUTH_".to_string()],
    )
    .unwrap();
    RequestRouter::new(Arc::new(feature))
}

fn headers(delete_token: Option<&'static str>) -> HeaderMap {
    let mut headers = HeaderMap::new();
    if let Some(value) = delete_token {
        headers.insert(DELETE_TOKEN_HEADER, HeaderValue::from_static(value));
    }
    headers
}

#[test]
fn test_route_is_exact_path_match() {
    let router = router(true);
    let headers = headers(None);

    for (path, expected) in [
        (ADMIN_PATH, Route::Admin),
        ("/sw_admin/", Route::NotAdminPath),
        ("/SW_ADMIN", Route::NotAdminPath),
        ("/v1/sw_admin", Route::NotAdminPath),
    ] {
        let request = AdminRequest {
            path,
            method: &Method::DELETE,
            headers: &headers,
            verdict: None,
        };
        assert_eq!(router.route(&request), expected, "path {}", path);
    }
}

#[test]
fn test_disabled_wins_over_everything() {
    let router = router(false);
    let headers = headers(None);
    let request = AdminRequest {
        path: ADMIN_PATH,
        method: &Method::PATCH,
        headers: &headers,
        verdict: Some(AuthorizationVerdict::Denied),
    };

    assert!(matches!(
        router.dispatch(&request),
        Dispatch::Reject(AdminError::FeatureDisabled)
    ));
}

#[test]
fn test_method_checked_before_header() {
    let router = router(true);
    let headers = headers(None);
    let request = AdminRequest {
        path: ADMIN_PATH,
        method: &Method::POST,
        headers: &headers,
        verdict: Some(AuthorizationVerdict::Allowed),
    };

    match router.dispatch(&request) {
        Dispatch::Reject(AdminError::UnsupportedMethod(method)) => assert_eq!(method, Method::POST),
        other => panic!("unexpected dispatch: {:?}", other),
    }
}

#[test]
fn test_identity_is_trimmed() {
    let router = router(true);
    let headers = headers(Some("  test:tester  "));
    let request = AdminRequest {
        path: ADMIN_PATH,
        method: &Method::DELETE,
        headers: &headers,
        verdict: Some(AuthorizationVerdict::Allowed),
    };

    match router.dispatch(&request) {
        Dispatch::Invalidate(identity) => assert_eq!(identity.as_str(), "test:tester"),
        other => panic!("unexpected dispatch: {:?}", other),
    }
}

#[test]
fn test_passthrough_skips_verdict() {
    let router = router(true);
    let headers = headers(None);
    let request = AdminRequest {
        path: "/v1/AUTH_test",
        method: &Method::GET,
        headers: &headers,
        verdict: None,
    };

    assert!(matches!(router.dispatch(&request), Dispatch::Passthrough));
}
