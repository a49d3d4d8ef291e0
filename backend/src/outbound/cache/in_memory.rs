//! Process-local response cache with per-entry expiry.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::domain::ports::{CachedResponse, ResponseCache, ResponseCacheError, ResponseCacheKey};

#[derive(Debug)]
struct Entry {
    response: CachedResponse,
    /// `None` when the TTL reaches past the clock's range.
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.is_none_or(|at| at > now)
    }
}

/// Response cache backed by a `RwLock`ed map.
///
/// Expired entries are dropped when read and by [`Self::purge_expired`].
/// A TTL too large for the clock keeps the entry until it is overwritten.
#[derive(Debug, Default)]
pub struct InMemoryResponseCache {
    entries: RwLock<HashMap<String, Entry>>,
}

impl InMemoryResponseCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove every expired entry, returning how many were dropped.
    pub async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| entry.is_live(now));
        before - entries.len()
    }

    /// Number of stored entries, live or not yet purged.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl ResponseCache for InMemoryResponseCache {
    async fn get(
        &self,
        key: &ResponseCacheKey,
    ) -> Result<Option<CachedResponse>, ResponseCacheError> {
        let now = Instant::now();
        {
            let entries = self.entries.read().await;
            match entries.get(key.as_str()) {
                None => return Ok(None),
                Some(entry) if entry.is_live(now) => return Ok(Some(entry.response.clone())),
                Some(_) => {}
            }
        }
        let mut entries = self.entries.write().await;
        if entries
            .get(key.as_str())
            .is_some_and(|entry| !entry.is_live(now))
        {
            entries.remove(key.as_str());
        }
        Ok(None)
    }

    async fn put(
        &self,
        key: &ResponseCacheKey,
        response: &CachedResponse,
        ttl: Duration,
    ) -> Result<(), ResponseCacheError> {
        let entry = Entry {
            response: response.clone(),
            expires_at: Instant::now().checked_add(ttl),
        };
        self.entries
            .write()
            .await
            .insert(key.as_str().to_owned(), entry);
        Ok(())
    }
}
