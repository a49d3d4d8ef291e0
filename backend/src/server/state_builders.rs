//! Builders for the HTTP state and the response cache.

use std::sync::Arc;
use std::time::Duration;

use actix_web::web;
use tracing::{debug, info};

use catalog::domain::ports::ResponseCache;
use catalog::inbound::http::state::HttpState;
use catalog::outbound::cache::{InMemoryResponseCache, RedisResponseCache};
use catalog::outbound::persistence::{DbPool, DieselCategoryRepository, DieselProductRepository};

use super::CatalogSettings;

/// Redis pool size; cache calls are short and never held across awaits.
const REDIS_POOL_SIZE: u32 = 8;

/// Bounds on how often the in-process cache sweeps expired entries.
const MIN_PURGE_INTERVAL: Duration = Duration::from_secs(1);
const MAX_PURGE_INTERVAL: Duration = Duration::from_secs(3600);

/// Wire the Diesel repositories into the category and product services.
pub(super) fn build_http_state(pool: &DbPool, query_timeout: Duration) -> web::Data<HttpState> {
    web::Data::new(HttpState::from_repositories(
        Arc::new(DieselCategoryRepository::new(pool.clone())),
        Arc::new(DieselProductRepository::new(pool.clone())),
        query_timeout,
    ))
}

/// Select the cache adapter: Redis when a URL is configured, otherwise an
/// in-process map purged once per TTL.
///
/// # Errors
///
/// Returns [`std::io::Error`] when the Redis pool cannot be built.
pub(super) async fn build_response_cache(
    settings: &CatalogSettings,
) -> std::io::Result<Arc<dyn ResponseCache>> {
    if let Some(url) = settings.redis_url.as_deref() {
        let cache = RedisResponseCache::connect(url, REDIS_POOL_SIZE)
            .await
            .map_err(std::io::Error::other)?;
        info!("response cache backed by redis");
        return Ok(Arc::new(cache));
    }

    let cache = Arc::new(InMemoryResponseCache::new());
    spawn_purge(cache.clone(), settings.cache_ttl());
    info!("response cache held in process");
    Ok(cache)
}

/// Sweep period for a TTL, kept within the purge bounds.
fn purge_interval(ttl: Duration) -> Duration {
    ttl.clamp(MIN_PURGE_INTERVAL, MAX_PURGE_INTERVAL)
}

fn spawn_purge(cache: Arc<InMemoryResponseCache>, ttl: Duration) {
    let every = purge_interval(ttl);
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        loop {
            ticker.tick().await;
            let purged = cache.purge_expired().await;
            if purged > 0 {
                debug!(purged, "expired response cache entries dropped");
            }
        }
    });
}
