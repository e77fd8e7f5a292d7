// Unit tests for TokenInvalidator against an instrumented cache

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use sw_admin::core::cache_key::CacheKey;
use sw_admin::core::errors::CacheError;
use sw_admin::core::models::InvalidationOutcome;
use sw_admin::engine::TokenInvalidator;

use crate::common::*;

fn invalidator(store: Arc<MockCacheStore>) -> TokenInvalidator {
    TokenInvalidator::new(store, "AUTH_", Duration::from_millis(100))
}

#[tokio::test]
async fn test_success_touches_each_key_once() {
    let store = Arc::new(MockCacheStore::default());
    seed(&store.inner, "AUTH_", "test:tester", "AUTH_tk0123").await;

    let outcome = invalidator(store.clone())
        .invalidate(&identity("test:tester"))
        .await;

    assert_eq!(outcome, InvalidationOutcome::Success);
    assert_eq!(store.gets.load(Ordering::SeqCst), 1);
    assert_eq!(store.deletes.load(Ordering::SeqCst), 2);
    assert!(store.inner.is_empty().await);
}

#[tokio::test]
async fn test_not_found_issues_no_deletes() {
    let store = Arc::new(MockCacheStore::default());

    let outcome = invalidator(store.clone()).invalidate(&identity("ghost")).await;

    assert_eq!(outcome, InvalidationOutcome::NotFound(identity("ghost")));
    assert_eq!(store.deletes.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_lookup_error_is_transient() {
    let mut store = MockCacheStore::default();
    store.get_should_fail = true;

    let outcome = invalidator(Arc::new(store)).invalidate(&identity("foo")).await;

    assert!(matches!(
        outcome,
        InvalidationOutcome::TransientFailure(CacheError::Backend(_))
    ));
}

#[tokio::test]
async fn test_lookup_timeout_is_transient() {
    let mut store = MockCacheStore::default();
    store.get_should_timeout = true;

    let outcome = invalidator(Arc::new(store)).invalidate(&identity("foo")).await;

    assert_eq!(
        outcome,
        InvalidationOutcome::TransientFailure(CacheError::Timeout {
            operation: "get",
            after: Duration::from_millis(100),
        })
    );
}

#[tokio::test]
async fn test_delete_timeout_on_both_keys_is_transient() {
    let mut store = MockCacheStore::default();
    store.delete_should_timeout = true;
    seed(&store.inner, "AUTH_", "foo", "tok123").await;
    let store = Arc::new(store);

    let outcome = invalidator(store.clone()).invalidate(&identity("foo")).await;

    assert!(matches!(
        outcome,
        InvalidationOutcome::TransientFailure(CacheError::Timeout { operation: "delete", .. })
    ));
    assert_eq!(store.deletes.load(Ordering::SeqCst), 2);
    // neither delete completed
    assert_eq!(
        cached(&store.inner, &CacheKey::identity("AUTH_", &identity("foo"))).await,
        Some("tok123".to_string())
    );
}

#[tokio::test]
async fn test_expired_token_still_clears_identity() {
    let store = Arc::new(MockCacheStore::default());
    store
        .inner
        .set(&CacheKey::identity("AUTH_", &identity("foo")), "expired")
        .await;
    let invalidator = invalidator(store.clone());

    let first = invalidator.invalidate(&identity("foo")).await;
    assert_eq!(
        first,
        InvalidationOutcome::TransientFailure(CacheError::NotAcknowledged(
            "AUTH_/token/expired".to_string()
        ))
    );
    assert_eq!(store.deletes.load(Ordering::SeqCst), 2);
    assert!(store.inner.is_empty().await);

    let second = invalidator.invalidate(&identity("foo")).await;
    assert_eq!(second, InvalidationOutcome::NotFound(identity("foo")));
}

#[tokio::test]
async fn test_delete_error_is_reported_after_both_attempts() {
    let mut failing = MockCacheStore::default();
    failing.delete_should_fail = true;
    seed(&failing.inner, "AUTH_", "foo", "tok123").await;
    let failing = Arc::new(failing);

    let outcome = invalidator(failing.clone()).invalidate(&identity("foo")).await;

    assert!(matches!(
        outcome,
        InvalidationOutcome::TransientFailure(CacheError::Backend(_))
    ));
    assert_eq!(failing.deletes.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_identity_is_not_rewritten() {
    let store = Arc::new(MockCacheStore::default());
    store
        .inner
        .set(&CacheKey::identity("AUTH_", &identity("Test:Tester")), "tok")
        .await;

    let outcome = invalidator(store.clone()).invalidate(&identity("test:tester")).await;

    assert_eq!(outcome, InvalidationOutcome::NotFound(identity("test:tester")));
    assert_eq!(store.inner.len().await, 1);
}
