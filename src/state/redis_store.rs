// Redis cache backend with key distribution across endpoints

use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};
use sha2::{Digest, Sha256};
use tokio::time::{sleep, timeout, Duration};

use crate::core::cache_key::CacheKey;
use crate::core::errors::CacheError;
use crate::state::CacheStore;

const MAX_RETRIES: u32 = 3;
const INITIAL_DELAY_MS: u64 = 500;

/// Redis store shared by all requests
///
/// Holds one `ConnectionManager` per configured endpoint. A key always maps
/// to the same endpoint, so the identity key and token key written by the
/// auth layer are found where it put them.
pub struct RedisCacheStore {
    shards: Vec<ConnectionManager>,
}

impl RedisCacheStore {
    /// Connect to every endpoint, in configuration order
    ///
    /// Each endpoint gets up to three attempts with linear backoff and is
    /// verified with PING before it is accepted.
    pub async fn connect(
        endpoints: &[String],
        connection_timeout: Duration,
    ) -> Result<Self, CacheError> {
        if endpoints.is_empty() {
            return Err(CacheError::Connection(
                "No cache endpoints configured".to_string(),
            ));
        }

        let mut shards = Vec::with_capacity(endpoints.len());
        for endpoint in endpoints {
            shards.push(Self::connect_endpoint(endpoint, connection_timeout).await?);
        }

        tracing::info!(endpoints = shards.len(), "Redis cache store connected");
        Ok(Self { shards })
    }

    async fn connect_endpoint(
        endpoint: &str,
        connection_timeout: Duration,
    ) -> Result<ConnectionManager, CacheError> {
        let mut connection_errors = Vec::new();

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                sleep(Duration::from_millis(INITIAL_DELAY_MS * attempt as u64)).await;
            }

            match Self::try_create_connection(endpoint, connection_timeout).await {
                Ok(mut manager) => match Self::ping_connection(&mut manager).await {
                    Ok(()) => {
                        if attempt > 0 {
                            tracing::info!(
                                endpoint = %endpoint,
                                "Redis connection succeeded on attempt {}",
                                attempt + 1
                            );
                        }
                        return Ok(manager);
                    }
                    Err(e) => {
                        connection_errors.push(format!("Connection created but ping failed: {}", e));
                    }
                },
                Err(e) => {
                    if attempt < MAX_RETRIES - 1 {
                        tracing::warn!(
                            attempt = attempt + 1,
                            max_attempts = MAX_RETRIES,
                            endpoint = %endpoint,
                            error = %e,
                            "Redis connection attempt failed, retrying..."
                        );
                    }
                    connection_errors.push(format!("Attempt {} failed: {}", attempt + 1, e));
                }
            }
        }

        Err(CacheError::Connection(format!(
            "Failed to connect to {} after {} attempts: {}",
            endpoint,
            MAX_RETRIES,
            connection_errors.join("; ")
        )))
    }

    async fn try_create_connection(
        endpoint: &str,
        connection_timeout: Duration,
    ) -> Result<ConnectionManager, CacheError> {
        let client = Client::open(endpoint).map_err(|e| {
            CacheError::Connection(format!("Invalid Redis URL format '{}': {}", endpoint, e))
        })?;

        timeout(connection_timeout, ConnectionManager::new(client))
            .await
            .map_err(|_| {
                CacheError::Connection(format!(
                    "ConnectionManager creation timed out after {:?}",
                    connection_timeout
                ))
            })?
            .map_err(|e| {
                CacheError::Connection(format!("Failed to create ConnectionManager: {}", e))
            })
    }

    async fn ping_connection(conn: &mut ConnectionManager) -> Result<(), CacheError> {
        let result: String = redis::cmd("PING")
            .query_async(conn)
            .await
            .map_err(|e| CacheError::Backend(format!("Redis ping failed: {}", e)))?;

        if result == "PONG" {
            Ok(())
        } else {
            Err(CacheError::Backend(format!(
                "Redis ping returned unexpected response: {}",
                result
            )))
        }
    }

    /// Connection for the endpoint owning `key`
    fn shard_for(&self, key: &CacheKey) -> ConnectionManager {
        self.shards[shard_index(key, self.shards.len())].clone()
    }
}

/// Stable endpoint index for a key
pub fn shard_index(key: &CacheKey, shard_count: usize) -> usize {
    if shard_count <= 1 {
        return 0;
    }
    let digest = Sha256::digest(key.as_str().as_bytes());
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest[..8]);
    (u64::from_be_bytes(prefix) % shard_count as u64) as usize
}

#[async_trait::async_trait]
impl CacheStore for RedisCacheStore {
    async fn get(&self, key: &CacheKey) -> Result<Option<String>, CacheError> {
        let mut conn = self.shard_for(key);
        conn.get::<_, Option<String>>(key.as_str())
            .await
            .map_err(|e| CacheError::Backend(format!("Failed to get key: {}", e)))
    }

    async fn delete(&self, key: &CacheKey) -> Result<bool, CacheError> {
        let mut conn = self.shard_for(key);
        let removed: i64 = conn
            .del(key.as_str())
            .await
            .map_err(|e| CacheError::Backend(format!("Failed to delete key: {}", e)))?;
        Ok(removed > 0)
    }

    async fn ping(&self) -> Result<(), CacheError> {
        for shard in &self.shards {
            let mut conn = shard.clone();
            Self::ping_connection(&mut conn).await?;
        }
        Ok(())
    }
}
