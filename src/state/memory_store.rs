// In-process cache backend for tests and `memory://` endpoints

use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::core::cache_key::CacheKey;
use crate::core::errors::CacheError;
use crate::state::CacheStore;

/// HashMap-backed `CacheStore`
#[derive(Debug, Default)]
pub struct MemoryCacheStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` under `key`, replacing any previous value
    pub async fn set(&self, key: &CacheKey, value: &str) {
        self.entries
            .write()
            .await
            .insert(key.as_str().to_string(), value.to_string());
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait::async_trait]
impl CacheStore for MemoryCacheStore {
    async fn get(&self, key: &CacheKey) -> Result<Option<String>, CacheError> {
        Ok(self.entries.read().await.get(key.as_str()).cloned())
    }

    async fn delete(&self, key: &CacheKey) -> Result<bool, CacheError> {
        Ok(self.entries.write().await.remove(key.as_str()).is_some())
    }

    async fn ping(&self) -> Result<(), CacheError> {
        Ok(())
    }
}
