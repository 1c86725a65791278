//! PostgreSQL persistence adapters built on Diesel.

mod diesel_comment_repository;
mod diesel_error_mapping;
mod diesel_product_repository;
mod diesel_user_repository;
mod diesel_vote_repository;
mod models;
mod pool;
pub mod schema;

pub use diesel_comment_repository::DieselCommentRepository;
pub use diesel_product_repository::DieselProductRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use diesel_vote_repository::DieselVoteRepository;
pub use pool::{DbPool, PoolConfig, PoolError};

use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

/// Embedded schema migrations applied at startup.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Errors raised while applying migrations.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    /// Could not open a connection for the migration run.
    #[error("failed to connect for migrations: {0}")]
    Connection(String),
    /// A migration failed to apply.
    #[error("failed to apply migrations: {0}")]
    Apply(String),
}

/// Apply pending migrations over a blocking connection.
///
/// Runs before the async pool spins up, so a plain synchronous connection
/// is sufficient here.
pub fn run_migrations(database_url: &str) -> Result<(), MigrationError> {
    let mut conn = PgConnection::establish(database_url)
        .map_err(|err| MigrationError::Connection(err.to_string()))?;
    conn.run_pending_migrations(MIGRATIONS)
        .map(|_| ())
        .map_err(|err| MigrationError::Apply(err.to_string()))
}
