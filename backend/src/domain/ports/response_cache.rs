//! Port for the read-through response cache.
//!
//! Entries are keyed by a digest of the request signature: method, path and
//! query parameters sorted by their raw `name=value` text, with the refresh
//! parameter removed. Two requests that differ only in parameter order or in
//! the presence of the refresh parameter therefore share an entry.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::define_port_error;

const KEY_PREFIX: &str = "response:v1:";

define_port_error! {
    /// Errors surfaced by response cache adapters.
    pub enum ResponseCacheError {
        /// Cache backend is unavailable or timing out.
        Backend { message: String } => "response cache backend failure: {message}",
        /// Encoding or decoding a cached entry failed.
        Serialization { message: String } =>
            "response cache serialisation failed: {message}",
    }
}

/// Canonical form of an inbound request used for cache lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSignature {
    method: String,
    path: String,
    params: Vec<String>,
    refresh: bool,
}

impl RequestSignature {
    /// Canonicalise a request, stripping `refresh_key` from the query.
    ///
    /// # Examples
    /// ```
    /// use catalog::domain::ports::RequestSignature;
    ///
    /// let a = RequestSignature::new("GET", "/api/products", "limit=5&offset=2", "opn");
    /// let b = RequestSignature::new("GET", "/api/products", "offset=2&opn&limit=5", "opn");
    /// assert!(b.refresh_requested());
    /// assert_eq!(a.cache_key(), b.cache_key());
    /// ```
    pub fn new(method: &str, path: &str, query: &str, refresh_key: &str) -> Self {
        let mut refresh = false;
        let mut params: Vec<String> = query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .filter(|pair| {
                let name = pair.split_once('=').map_or(*pair, |(name, _)| name);
                let is_refresh = !refresh_key.is_empty() && name == refresh_key;
                refresh |= is_refresh;
                !is_refresh
            })
            .map(str::to_owned)
            .collect();
        params.sort_unstable();
        Self {
            method: method.to_ascii_uppercase(),
            path: path.to_owned(),
            params,
            refresh,
        }
    }

    /// Whether the caller asked to bypass any cached entry.
    pub fn refresh_requested(&self) -> bool {
        self.refresh
    }

    /// Digest key for this signature.
    pub fn cache_key(&self) -> ResponseCacheKey {
        let mut hasher = Sha256::new();
        hasher.update(self.to_string().as_bytes());
        ResponseCacheKey(format!("{KEY_PREFIX}{}", hex::encode(hasher.finalize())))
    }
}

impl fmt::Display for RequestSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)?;
        if !self.params.is_empty() {
            write!(f, "?{}", self.params.join("&"))?;
        }
        Ok(())
    }
}

/// Opaque cache key in the form `response:v1:<sha256 hex>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResponseCacheKey(String);

impl ResponseCacheKey {
    /// Borrow the key text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ResponseCacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for ResponseCacheKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Stored response, replayed verbatim on a hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

/// Response cache storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResponseCache: Send + Sync {
    /// Read a live entry, if present.
    async fn get(&self, key: &ResponseCacheKey)
    -> Result<Option<CachedResponse>, ResponseCacheError>;

    /// Store an entry that expires after `ttl`.
    async fn put(
        &self,
        key: &ResponseCacheKey,
        response: &CachedResponse,
        ttl: Duration,
    ) -> Result<(), ResponseCacheError>;
}
