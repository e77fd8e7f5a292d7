// Token invalidation: resolve identity -> token, then delete the key pair

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::core::cache_key::CacheKey;
use crate::core::errors::CacheError;
use crate::core::models::{Identity, InvalidationOutcome};
use crate::state::CacheStore;

/// Removes the cached identity -> token mapping for one identity per call
///
/// Every cache call is bounded by `operation_timeout`. Nothing is retried and
/// no lock is held between the lookup and the deletes.
#[derive(Clone)]
pub struct TokenInvalidator {
    cache: Arc<dyn CacheStore>,
    reseller_prefix: String,
    operation_timeout: Duration,
}

impl TokenInvalidator {
    pub fn new(
        cache: Arc<dyn CacheStore>,
        reseller_prefix: impl Into<String>,
        operation_timeout: Duration,
    ) -> Self {
        Self {
            cache,
            reseller_prefix: reseller_prefix.into(),
            operation_timeout,
        }
    }

    /// Invalidate the cached credential of `identity`
    ///
    /// 1. Look up `<prefix>/user/<identity>`; absent -> `NotFound`, nothing deleted.
    /// 2. Delete `<prefix>/token/<value>`, then the identity key. Both deletes
    ///    are always attempted.
    /// 3. `Success` only when both deletes report the key as removed;
    ///    otherwise the first failure is reported.
    ///
    /// A token key that already expired still leaves the identity key
    /// removed, so the mapping ends up uncached even when the call reports a
    /// failure.
    pub async fn invalidate(&self, identity: &Identity) -> InvalidationOutcome {
        let identity_key = CacheKey::identity(&self.reseller_prefix, identity);

        let token = match self.bounded("get", self.cache.get(&identity_key)).await {
            Ok(Some(token)) => token,
            Ok(None) => {
                debug!(key = %identity_key, "Identity key not cached");
                return InvalidationOutcome::NotFound(identity.clone());
            }
            Err(e) => return InvalidationOutcome::TransientFailure(e),
        };

        let token_key = CacheKey::token(&self.reseller_prefix, &token);

        let token_deleted = self.delete_acknowledged(&token_key).await;
        let identity_deleted = self.delete_acknowledged(&identity_key).await;

        match token_deleted.and(identity_deleted) {
            Ok(()) => InvalidationOutcome::Success,
            Err(e) => InvalidationOutcome::TransientFailure(e),
        }
    }

    async fn delete_acknowledged(&self, key: &CacheKey) -> Result<(), CacheError> {
        if self.bounded("delete", self.cache.delete(key)).await? {
            Ok(())
        } else {
            Err(CacheError::NotAcknowledged(key.to_string()))
        }
    }

    /// Apply the per-operation timeout at the call boundary
    async fn bounded<T>(
        &self,
        operation: &'static str,
        call: impl Future<Output = Result<T, CacheError>>,
    ) -> Result<T, CacheError> {
        tokio::time::timeout(self.operation_timeout, call)
            .await
            .map_err(|_| CacheError::Timeout {
                operation,
                after: self.operation_timeout,
            })?
    }
}
