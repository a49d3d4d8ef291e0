//! Service settings loaded via OrthoConfig.
//!
//! Values layer from defaults, a config file, `CATALOG_*` environment
//! variables and command-line flags, later sources winning.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Configuration values for the catalog server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CATALOG")]
pub struct CatalogSettings {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// Socket address to listen on.
    #[ortho_config(default = DEFAULT_BIND_ADDR.to_owned())]
    pub bind_addr: String,
    /// Mount point of the JSON API.
    #[ortho_config(default = "/api".to_owned())]
    pub api_prefix: String,
    /// Upper bound on pooled database connections.
    #[ortho_config(default = 10)]
    pub db_max_connections: u32,
    /// Deadline for each storage call, in milliseconds.
    #[ortho_config(default = 5000)]
    pub query_timeout_ms: u64,
    /// Lifetime of cached responses, in seconds.
    #[ortho_config(default = 60)]
    pub cache_ttl_secs: u64,
    /// Query parameter forcing a cache refill.
    #[ortho_config(default = "opn".to_owned())]
    pub cache_refresh_key: String,
    /// Redis URL; the in-process cache is used when absent.
    pub redis_url: Option<String>,
    #[ortho_config(default = true)]
    pub cache_enabled: bool,
    /// Apply embedded migrations before serving.
    #[ortho_config(default = false)]
    pub migrate: bool,
}

impl CatalogSettings {
    /// Parsed listen address.
    ///
    /// # Errors
    ///
    /// Returns [`std::io::ErrorKind::InvalidInput`] for an unparsable address.
    pub fn socket_addr(&self) -> std::io::Result<SocketAddr> {
        self.bind_addr.parse().map_err(|err| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid bind address {:?}: {err}", self.bind_addr),
            )
        })
    }

    pub fn query_timeout(&self) -> Duration {
        Duration::from_millis(self.query_timeout_ms)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}
