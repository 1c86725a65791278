//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use backend::outbound::persistence::DbPool;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:2022";
const DEFAULT_DB_POOL_MAX_SIZE: u32 = 10;

/// Configuration values controlling the HTTP server, loaded via OrthoConfig
/// from CLI arguments and `LOCAL_HUNT_*` environment variables.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "LOCAL_HUNT")]
pub struct Settings {
    /// Socket address the server binds to.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection string. When absent, the server runs with
    /// fixture ports and persists nothing.
    pub database_url: Option<String>,
    /// Maximum number of connections in the database pool.
    pub db_pool_max_size: Option<u32>,
}

impl Settings {
    /// Return the configured bind address, falling back to the default.
    pub fn bind_addr(&self) -> &str {
        self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR)
    }

    /// Return the configured pool size, falling back to the default.
    pub fn db_pool_max_size(&self) -> u32 {
        self.db_pool_max_size.unwrap_or(DEFAULT_DB_POOL_MAX_SIZE)
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Construct a server configuration for the given bind address.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            db_pool: None,
        }
    }

    /// Attach a database connection pool for persistence adapters.
    ///
    /// When provided, the server uses database-backed implementations for
    /// every driving port; otherwise fixture implementations serve requests.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for server configuration parsing.

    use std::ffi::OsString;

    use rstest::rstest;

    use super::*;

    fn load_from_empty_args() -> Settings {
        Settings::load_from_iter([OsString::from("backend")]).expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_nothing_is_configured() {
        let settings = load_from_empty_args();
        assert_eq!(settings.bind_addr(), DEFAULT_BIND_ADDR);
        assert_eq!(settings.db_pool_max_size(), DEFAULT_DB_POOL_MAX_SIZE);
        assert!(settings.database_url.is_none());
    }

    #[rstest]
    fn overrides_take_precedence() {
        let settings = Settings {
            bind_addr: Some("127.0.0.1:9000".to_owned()),
            database_url: Some("postgres://localhost/local_hunt".to_owned()),
            db_pool_max_size: Some(4),
        };
        assert_eq!(settings.bind_addr(), "127.0.0.1:9000");
        assert_eq!(settings.db_pool_max_size(), 4);
    }
}
