//! # Bahrululum Auth
//!
//! Signed token handling for the Bahrululum API.
//!
//! - [`claims`]: access and refresh token claim structures
//! - [`jwt`]: token creation and verification
//!
//! Both token kinds are HS256 JWTs carrying the user id (`sub`), the issuer,
//! `iat` and `exp`. A `kind` claim keeps a refresh token from being accepted
//! where an access token is expected and vice versa.
//!
//! # Example
//!
//! ```ignore
//! use bahrululum_auth::{generate_token_pair, verify_access_token};
//! use bahrululum_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let pair = generate_token_pair(user_id, &config)?;
//! let claims = verify_access_token(&pair.access_token, &config)?;
//! assert_eq!(claims.sub, user_id);
//! ```

pub mod claims;
pub mod jwt;

pub use claims::{Claims, RefreshTokenClaims, TokenKind, TokenPair};
pub use jwt::{
    create_access_token, create_refresh_token, generate_token_pair, verify_access_token,
    verify_refresh_token,
};
