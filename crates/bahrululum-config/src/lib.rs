//! # Bahrululum Config
//!
//! Configuration structures loaded from environment variables:
//!
//! - [`server`]: bind address and shutdown grace period
//! - [`database`]: PostgreSQL connection settings and pool sizing
//! - [`jwt`]: token signing secret, lifetimes and issuer
//! - [`cors`]: allowed browser origins
//! - [`logging`]: log level, output format and log directory
//!
//! Every struct exposes `from_env()` plus a `from_lookup()` that takes any
//! key → value function, which is what the tests use.
//!
//! # Example
//!
//! ```ignore
//! use bahrululum_config::{DatabaseConfig, JwtConfig, ServerConfig};
//!
//! dotenvy::dotenv().ok();
//! let server = ServerConfig::from_env();
//! let database = DatabaseConfig::from_env();
//! let jwt = JwtConfig::from_env();
//! ```

pub mod cors;
pub mod database;
pub mod jwt;
pub mod logging;
pub mod server;

pub use cors::CorsConfig;
pub use database::DatabaseConfig;
pub use jwt::JwtConfig;
pub use logging::{LogConfig, LogFormat};
pub use server::ServerConfig;

pub(crate) fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

pub(crate) fn string_or<F>(lookup: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
pub(crate) fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: std::collections::HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}
