// Requests for other paths reach the downstream pipeline untouched

use axum::http::{Method, StatusCode};
use std::sync::Arc;
use tower::ServiceExt;

use crate::common::*;

#[tokio::test]
async fn test_other_paths_reach_downstream_without_cache_calls() {
    let paths = ["/", "/v1/AUTH_test/c/o", "/sw_admin2", "/sw_admin/extra", "/info"];

    for path in paths {
        let store = Arc::new(MockCacheStore::default());
        let app = build_app(store.clone(), test_config(true));

        let response = app
            .oneshot(request_to(path, Method::DELETE, Some("foo"), None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK, "path {}", path);
        assert_eq!(body_string(response).await, FAKE_APP_BODY);
        assert_eq!(store.calls(), 0);
    }
}

#[tokio::test]
async fn test_passthrough_when_feature_disabled() {
    let store = Arc::new(MockCacheStore::default());
    let app = build_app(store.clone(), test_config(false));

    let response = app
        .oneshot(request_to("/v1/AUTH_test", Method::GET, None, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, FAKE_APP_BODY);
}

#[tokio::test]
async fn test_passthrough_ignores_authorization() {
    let app = build_app(Arc::new(MockCacheStore::default()), test_config(true));

    let response = app
        .oneshot(request_to("/v1/AUTH_test", Method::PUT, None, Some("wrong")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, FAKE_APP_BODY);
}

#[tokio::test]
async fn test_query_string_does_not_change_admin_match() {
    let store = Arc::new(MockCacheStore::default());
    let app = build_app(store.clone(), test_config(true));

    let response = app
        .oneshot(request_to("/sw_admin?force=1", Method::DELETE, None, Some(ADMIN_KEY)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(store.calls(), 0);
}
