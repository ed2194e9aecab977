use std::env;

use crate::{parse_or, string_or};

#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    /// Access token lifetime in seconds.
    pub access_token_expiry: i64,
    /// Refresh token lifetime in seconds.
    pub refresh_token_expiry: i64,
    pub issuer: String,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            secret: string_or(&lookup, "JWT_SECRET", "your-secret-key-change-in-production"),
            access_token_expiry: parse_or(&lookup, "JWT_ACCESS_EXPIRY", 900), // 15 minutes
            refresh_token_expiry: parse_or(&lookup, "JWT_REFRESH_EXPIRY", 604800), // 7 days
            issuer: string_or(&lookup, "JWT_ISSUER", "bahrululum"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup_from;

    #[test]
    fn test_defaults() {
        let config = JwtConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config.access_token_expiry, 900);
        assert_eq!(config.refresh_token_expiry, 604800);
        assert_eq!(config.issuer, "bahrululum");
    }

    #[test]
    fn test_overrides() {
        let config = JwtConfig::from_lookup(lookup_from(&[
            ("JWT_SECRET", "s3cret"),
            ("JWT_ACCESS_EXPIRY", "60"),
            ("JWT_ISSUER", "test-issuer"),
        ]));
        assert_eq!(config.secret, "s3cret");
        assert_eq!(config.access_token_expiry, 60);
        assert_eq!(config.issuer, "test-issuer");
    }
}
