use std::env;
use std::str::FromStr;
use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgSslMode};

use crate::{parse_or, string_or};

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub ssl_mode: String,
    /// Full connection string; takes precedence over the individual parts.
    pub url: Option<String>,
    pub max_connections: u32,
    pub min_connections: u32,
    pub max_lifetime: Duration,
}

impl DatabaseConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            host: string_or(&lookup, "DB_HOST", "localhost"),
            port: parse_or(&lookup, "DB_PORT", 5432),
            user: string_or(&lookup, "DB_USER", "postgres"),
            password: lookup("DB_PASSWORD").unwrap_or_default(),
            name: string_or(&lookup, "DB_NAME", "bahrululum"),
            ssl_mode: string_or(&lookup, "DB_SSL_MODE", "disable"),
            url: lookup("DATABASE_URL").filter(|s| !s.is_empty()),
            max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", 25),
            min_connections: parse_or(&lookup, "DB_MIN_CONNECTIONS", 5),
            max_lifetime: Duration::from_secs(3600),
        }
    }

    /// Connection options for the application database.
    ///
    /// `DATABASE_URL` is parsed as-is (credentials must be percent-encoded
    /// there); otherwise the options are built from the individual parts,
    /// which are passed through verbatim.
    pub fn connect_options(&self) -> Result<PgConnectOptions, sqlx::Error> {
        match &self.url {
            Some(url) => PgConnectOptions::from_str(url),
            None => Ok(PgConnectOptions::new()
                .host(&self.host)
                .port(self.port)
                .username(&self.user)
                .password(&self.password)
                .database(&self.name)
                .ssl_mode(PgSslMode::from_str(&self.ssl_mode)?)),
        }
    }

    /// Options for the `postgres` maintenance database on the same server.
    pub fn maintenance_options(&self) -> Result<PgConnectOptions, sqlx::Error> {
        Ok(self.connect_options()?.database("postgres"))
    }

    /// Name of the application database, read from `DATABASE_URL` when set.
    pub fn database_name(&self) -> String {
        self.url
            .as_deref()
            .and_then(|url| PgConnectOptions::from_str(url).ok())
            .and_then(|options| options.get_database().map(str::to_string))
            .unwrap_or_else(|| self.name.clone())
    }
}
