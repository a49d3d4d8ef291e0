//! Server construction from loaded settings.

mod config;
mod state_builders;

pub use config::CatalogSettings;

use state_builders::{build_http_state, build_response_cache};

use actix_web::HttpServer;
use actix_web::dev::Server;
use tracing::info;

use catalog::inbound::http::app::{AppDependencies, build_app};
use catalog::inbound::http::response_cache::ReadThroughCache;
use catalog::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};

/// Construct the Actix HTTP server described by `settings`.
///
/// Builds the database pool (and applies migrations when asked), selects
/// the response cache and binds the listener.
///
/// # Returns
/// A [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when migrations, pool construction, cache
/// setup or binding fail.
pub async fn create_server(settings: CatalogSettings) -> std::io::Result<Server> {
    if settings.migrate {
        let applied = run_pending_migrations(&settings.database_url)
            .await
            .map_err(std::io::Error::other)?;
        info!(applied, "database migrations applied");
    }

    let pool = DbPool::new(
        PoolConfig::new(settings.database_url.clone())
            .with_max_size(settings.db_max_connections),
    )
    .await
    .map_err(std::io::Error::other)?;

    let http_state = build_http_state(&pool, settings.query_timeout());
    let cache = build_response_cache(&settings).await?;
    let deps = AppDependencies {
        http_state,
        response_cache: ReadThroughCache::new(
            cache,
            settings.cache_ttl(),
            &settings.cache_refresh_key,
        ),
        cache_enabled: settings.cache_enabled,
        api_prefix: settings.api_prefix.clone(),
    };
    let bind_addr = settings.socket_addr()?;

    let server = HttpServer::new(move || build_app(deps.clone()))
        .bind(bind_addr)?
        .run();
    info!(%bind_addr, "catalog server listening");
    Ok(server)
}
