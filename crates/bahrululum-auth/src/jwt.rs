//! Token creation and verification.
//!
//! Tokens are signed with HS256 using [`JwtConfig::secret`]. Verification
//! checks the signature, `exp` (with the default 60 second leeway), the
//! issuer and the token kind.

use anyhow::anyhow;
use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use bahrululum_config::JwtConfig;
use bahrululum_core::AppError;

use crate::claims::{Claims, RefreshTokenClaims, TokenKind, TokenPair};

const INVALID_TOKEN: &str = "Invalid or expired token";

fn sign<T: Serialize>(claims: &T, jwt_config: &JwtConfig) -> Result<String, AppError> {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(anyhow!("Failed to create token: {}", e)))
}

fn decode_claims<T: DeserializeOwned>(token: &str, jwt_config: &JwtConfig) -> Option<T> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[jwt_config.issuer.as_str()]);

    decode::<T>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .ok()
}

/// Creates a short-lived access token for `user_id`.
pub fn create_access_token(user_id: Uuid, jwt_config: &JwtConfig) -> Result<String, AppError> {
    let now = Utc::now().timestamp();

    let claims = Claims {
        sub: user_id,
        kind: TokenKind::Access,
        iss: jwt_config.issuer.clone(),
        iat: now,
        exp: now + jwt_config.access_token_expiry,
    };

    sign(&claims, jwt_config)
}

/// Creates a long-lived refresh token for `user_id`.
///
/// Each token gets a random `jti`, so two tokens for the same user are never equal.
pub fn create_refresh_token(user_id: Uuid, jwt_config: &JwtConfig) -> Result<String, AppError> {
    let now = Utc::now().timestamp();

    let claims = RefreshTokenClaims {
        sub: user_id,
        kind: TokenKind::Refresh,
        iss: jwt_config.issuer.clone(),
        iat: now,
        exp: now + jwt_config.refresh_token_expiry,
        jti: Uuid::new_v4().to_string(),
    };

    sign(&claims, jwt_config)
}

/// Issues an access token and a refresh token together.
pub fn generate_token_pair(user_id: Uuid, jwt_config: &JwtConfig) -> Result<TokenPair, AppError> {
    let now = Utc::now().timestamp();

    Ok(TokenPair {
        access_token: create_access_token(user_id, jwt_config)?,
        refresh_token: create_refresh_token(user_id, jwt_config)?,
        expires_at: now + jwt_config.access_token_expiry,
        refresh_expires_at: now + jwt_config.refresh_token_expiry,
        token_type: "Bearer".to_string(),
    })
}

/// Verifies an access token.
///
/// # Errors
///
/// 401 `Invalid or expired token` on a bad signature, expired token, wrong
/// issuer, or a refresh token presented in place of an access token.
pub fn verify_access_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    decode_claims::<Claims>(token, jwt_config)
        .filter(|claims| claims.kind == TokenKind::Access)
        .ok_or_else(|| AppError::unauthorized(anyhow!(INVALID_TOKEN)))
}

/// Verifies a refresh token. Fails the same way as [`verify_access_token`].
pub fn verify_refresh_token(
    token: &str,
    jwt_config: &JwtConfig,
) -> Result<RefreshTokenClaims, AppError> {
    decode_claims::<RefreshTokenClaims>(token, jwt_config)
        .filter(|claims| claims.kind == TokenKind::Refresh)
        .ok_or_else(|| AppError::unauthorized(anyhow!(INVALID_TOKEN)))
}
