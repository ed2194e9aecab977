//! # Bahrululum DB
//!
//! PostgreSQL connection pool, embedded migrations and helpers for mapping
//! constraint violations onto HTTP errors.
//!
//! # Example
//!
//! ```ignore
//! use bahrululum_config::DatabaseConfig;
//! use bahrululum_db::{init_db_pool, MIGRATOR};
//!
//! let pool = init_db_pool(&DatabaseConfig::from_env()).await?;
//! MIGRATOR.run(&pool).await?;
//! ```

use anyhow::anyhow;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

use bahrululum_config::DatabaseConfig;
use bahrululum_core::AppError;

pub use sqlx::PgPool;

/// Migrations under the workspace `migrations/` directory, embedded at build time.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Creates the connection pool.
///
/// Pool size and connection lifetime come from [`DatabaseConfig`].
pub async fn init_db_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .max_lifetime(config.max_lifetime)
        .connect_with(config.connect_options()?)
        .await?;

    info!(
        database = %config.database_name(),
        max_connections = config.max_connections,
        "Database pool initialized"
    );

    Ok(pool)
}

/// Round-trips a trivial query.
pub async fn ping(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await.map(|_| ())
}

/// Maps an insert/update failure onto an [`AppError`].
///
/// Unique violations become 409 with `duplicate`; foreign key violations
/// become 422 with `missing_parent`. Anything else is a 500.
pub fn map_write_error(err: sqlx::Error, duplicate: &str, missing_parent: &str) -> AppError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return AppError::conflict(anyhow!("{}", duplicate));
        }
        if db_err.is_foreign_key_violation() {
            return AppError::unprocessable(anyhow!("{}", missing_parent));
        }
    }
    AppError::from(err)
}
