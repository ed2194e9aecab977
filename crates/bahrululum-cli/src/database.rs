//! Database lifecycle commands.
//!
//! `create-db` and `drop-db` connect to the `postgres` maintenance database
//! on the same server; both are no-ops when there is nothing to do.
//!
//! Migrations are reversible (`<version>_<name>.up.sql` / `.down.sql`), so
//! the CLI can roll back one step or reset the schema entirely.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use chrono::Utc;
use sqlx::{Connection, PgConnection, PgPool};

use bahrululum_config::DatabaseConfig;
use bahrululum_db::MIGRATOR;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationStatus {
    pub version: i64,
    pub description: String,
    pub applied: bool,
}

/// Quotes a Postgres identifier. `CREATE DATABASE` cannot take bind parameters.
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

async fn connect_maintenance(config: &DatabaseConfig) -> anyhow::Result<PgConnection> {
    PgConnection::connect_with(&config.maintenance_options()?)
        .await
        .context("Failed to connect to the postgres maintenance database")
}

async fn database_exists(conn: &mut PgConnection, name: &str) -> anyhow::Result<bool> {
    let exists = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS (SELECT 1 FROM pg_catalog.pg_database WHERE datname = $1)",
    )
    .bind(name)
    .fetch_one(conn)
    .await?;

    Ok(exists)
}

/// Returns `true` if the database was created, `false` if it already existed.
pub async fn create_database(config: &DatabaseConfig) -> anyhow::Result<bool> {
    let name = config.database_name();
    let mut conn = connect_maintenance(config).await?;

    if database_exists(&mut conn, &name).await? {
        return Ok(false);
    }

    sqlx::query(&format!("CREATE DATABASE {}", quote_identifier(&name)))
        .execute(&mut conn)
        .await
        .with_context(|| format!("Failed to create database '{}'", name))?;

    Ok(true)
}

/// Terminates other sessions on the database, then drops it.
///
/// Returns `true` if the database was dropped, `false` if it did not exist.
pub async fn drop_database(config: &DatabaseConfig) -> anyhow::Result<bool> {
    let name = config.database_name();
    let mut conn = connect_maintenance(config).await?;

    if !database_exists(&mut conn, &name).await? {
        return Ok(false);
    }

    if let Err(e) = sqlx::query(
        r#"SELECT pg_terminate_backend(pid)
           FROM pg_stat_activity
           WHERE datname = $1 AND pid <> pg_backend_pid()"#,
    )
    .bind(&name)
    .execute(&mut conn)
    .await
    {
        println!("⚠️  Failed to terminate connections: {}", e);
    }

    sqlx::query(&format!("DROP DATABASE {}", quote_identifier(&name)))
        .execute(&mut conn)
        .await
        .with_context(|| format!("Failed to drop database '{}'", name))?;

    Ok(true)
}

pub async fn run_migrations(pool: &PgPool) -> anyhow::Result<()> {
    MIGRATOR
        .run(pool)
        .await
        .context("Failed to run migrations")
}

/// Versions recorded as successfully applied, oldest first.
pub async fn applied_versions(pool: &PgPool) -> anyhow::Result<Vec<i64>> {
    let table_exists = sqlx::query_scalar::<_, bool>(
        "SELECT to_regclass('_sqlx_migrations') IS NOT NULL",
    )
    .fetch_one(pool)
    .await?;

    if !table_exists {
        return Ok(Vec::new());
    }

    let versions = sqlx::query_scalar::<_, i64>(
        "SELECT version FROM _sqlx_migrations WHERE success ORDER BY version",
    )
    .fetch_all(pool)
    .await?;

    Ok(versions)
}

/// The most recently applied version, if any.
pub async fn current_version(pool: &PgPool) -> anyhow::Result<Option<i64>> {
    Ok(applied_versions(pool).await?.last().copied())
}

/// Every embedded migration, flagged with whether it has been applied.
pub async fn migration_status(pool: &PgPool) -> anyhow::Result<Vec<MigrationStatus>> {
    let applied: HashSet<i64> = applied_versions(pool).await?.into_iter().collect();

    Ok(MIGRATOR
        .iter()
        .filter(|m| !m.migration_type.is_down_migration())
        .map(|m| MigrationStatus {
            version: m.version,
            description: m.description.to_string(),
            applied: applied.contains(&m.version),
        })
        .collect())
}

/// Reverts the latest applied migration. Returns its version, or `None`
/// when nothing was applied.
pub async fn rollback_last(pool: &PgPool) -> anyhow::Result<Option<i64>> {
    let applied = applied_versions(pool).await?;
    let Some((&latest, rest)) = applied.split_last() else {
        return Ok(None);
    };
    let target = rest.last().copied().unwrap_or(0);

    MIGRATOR
        .undo(pool, target)
        .await
        .with_context(|| format!("Failed to roll back migration {}", latest))?;

    Ok(Some(latest))
}

/// Reverts every applied migration. Returns how many were reverted.
pub async fn reset_migrations(pool: &PgPool) -> anyhow::Result<usize> {
    let applied = applied_versions(pool).await?.len();
    if applied == 0 {
        return Ok(0);
    }

    MIGRATOR
        .undo(pool, 0)
        .await
        .context("Failed to roll back migrations")?;

    Ok(applied)
}

/// Turns free text into a migration file stem: lowercase words joined by `_`.
pub fn migration_slug(name: &str) -> String {
    name.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}

/// Writes an empty `.up.sql` / `.down.sql` pair named after the current UTC
/// timestamp. Returns the two paths.
pub fn create_migration(dir: &Path, name: &str) -> anyhow::Result<(PathBuf, PathBuf)> {
    let slug = migration_slug(name);
    if slug.is_empty() {
        bail!("Migration name must contain at least one letter or digit");
    }

    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory '{}'", dir.display()))?;

    let stem = format!("{}_{}", Utc::now().format("%Y%m%d%H%M%S"), slug);
    let up = dir.join(format!("{}.up.sql", stem));
    let down = dir.join(format!("{}.down.sql", stem));

    if up.exists() || down.exists() {
        bail!("Migration '{}' already exists", stem);
    }

    fs::write(&up, format!("-- {}\n", name.trim()))
        .with_context(|| format!("Failed to write '{}'", up.display()))?;
    fs::write(&down, format!("-- Revert: {}\n", name.trim()))
        .with_context(|| format!("Failed to write '{}'", down.display()))?;

    Ok((up, down))
}
