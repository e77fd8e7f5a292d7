// Cache collaborator contract and its backends

pub mod memory_store;
pub mod redis_store;

use crate::core::cache_key::CacheKey;
use crate::core::errors::CacheError;

/// Key-value operations the admin layer needs from the remote cache
///
/// Implementations are long-lived and shared across requests
/// (`Arc<dyn CacheStore>`). Timeouts are applied by the caller.
#[async_trait::async_trait]
pub trait CacheStore: Send + Sync {
    /// Fetch the value stored under `key`, `None` when absent
    async fn get(&self, key: &CacheKey) -> Result<Option<String>, CacheError>;

    /// Remove `key`; `Ok(true)` when the cache reports the key as removed
    async fn delete(&self, key: &CacheKey) -> Result<bool, CacheError>;

    /// Connectivity check for health reporting
    async fn ping(&self) -> Result<(), CacheError>;
}
