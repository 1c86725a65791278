//! Backend entry-point: wires REST endpoints, persistence, and OpenAPI docs.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use backend::inbound::http::health::HealthState;
use backend::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use server::{ServerConfig, Settings};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = Settings::load()
        .map_err(|err| std::io::Error::other(format!("configuration error: {err}")))?;
    let bind_addr: std::net::SocketAddr = settings
        .bind_addr()
        .parse()
        .map_err(|err| std::io::Error::other(format!("invalid bind address: {err}")))?;

    let mut config = ServerConfig::new(bind_addr);
    if let Some(database_url) = settings.database_url.clone() {
        let migration_url = database_url.clone();
        tokio::task::spawn_blocking(move || run_migrations(&migration_url))
            .await
            .map_err(|err| std::io::Error::other(format!("migration task failed: {err}")))?
            .map_err(|err| std::io::Error::other(format!("migration error: {err}")))?;

        let pool_config =
            PoolConfig::new(database_url).with_max_size(settings.db_pool_max_size());
        let pool = DbPool::new(pool_config)
            .await
            .map_err(|err| std::io::Error::other(format!("pool error: {err}")))?;
        config = config.with_db_pool(pool);
    } else {
        warn!("LOCAL_HUNT_DATABASE_URL not set; serving with fixture ports");
    }

    let health_state = web::Data::new(HealthState::new());
    let server = server::create_server(health_state, config)?;
    server.await
}
