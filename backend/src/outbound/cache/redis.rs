//! Redis response cache using a `bb8` connection pool.
//!
//! Entries are JSON-encoded [`CachedResponse`] values written with
//! `SET .. EX`, so Redis evicts them on expiry.

use std::time::Duration;

use async_trait::async_trait;
use bb8_redis::RedisConnectionManager;
use bb8_redis::bb8::Pool;
use bb8_redis::redis::AsyncCommands;

use crate::domain::ports::{CachedResponse, ResponseCache, ResponseCacheError, ResponseCacheKey};

/// Response cache stored in Redis.
#[derive(Clone)]
pub struct RedisResponseCache {
    pool: Pool<RedisConnectionManager>,
}

impl RedisResponseCache {
    /// Connect a pool of at most `max_size` connections to `url`.
    ///
    /// # Errors
    ///
    /// Returns [`ResponseCacheError::Backend`] when the URL is invalid or the
    /// pool cannot be built.
    pub async fn connect(url: &str, max_size: u32) -> Result<Self, ResponseCacheError> {
        let manager = RedisConnectionManager::new(url)
            .map_err(|err| ResponseCacheError::backend(err.to_string()))?;
        let pool = Pool::builder()
            .max_size(max_size.max(1))
            .connection_timeout(Duration::from_secs(2))
            .build(manager)
            .await
            .map_err(|err| ResponseCacheError::backend(err.to_string()))?;
        Ok(Self { pool })
    }
}

/// Whole seconds for `SET EX`, never zero.
fn expiry_seconds(ttl: Duration) -> u64 {
    ttl.as_secs().max(1)
}

#[async_trait]
impl ResponseCache for RedisResponseCache {
    async fn get(
        &self,
        key: &ResponseCacheKey,
    ) -> Result<Option<CachedResponse>, ResponseCacheError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| ResponseCacheError::backend(err.to_string()))?;
        let raw: Option<Vec<u8>> = conn
            .get(key.as_str())
            .await
            .map_err(|err| ResponseCacheError::backend(err.to_string()))?;
        raw.map(|bytes| {
            serde_json::from_slice(&bytes)
                .map_err(|err| ResponseCacheError::serialization(err.to_string()))
        })
        .transpose()
    }

    async fn put(
        &self,
        key: &ResponseCacheKey,
        response: &CachedResponse,
        ttl: Duration,
    ) -> Result<(), ResponseCacheError> {
        let payload = serde_json::to_vec(response)
            .map_err(|err| ResponseCacheError::serialization(err.to_string()))?;
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| ResponseCacheError::backend(err.to_string()))?;
        conn.set_ex::<_, _, ()>(key.as_str(), payload, expiry_seconds(ttl))
            .await
            .map_err(|err| ResponseCacheError::backend(err.to_string()))
    }
}
