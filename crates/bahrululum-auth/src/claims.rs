//! JWT claim structures.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// Claims carried by an access token.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// User ID
    pub sub: Uuid,
    pub kind: TokenKind,
    pub iss: String,
    /// Issued-at (Unix timestamp)
    pub iat: i64,
    /// Expiration (Unix timestamp)
    pub exp: i64,
}

/// Claims carried by a refresh token.
///
/// `jti` makes two refresh tokens issued in the same second distinct, which
/// the unique index on stored tokens relies on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshTokenClaims {
    pub sub: Uuid,
    pub kind: TokenKind,
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}

/// Access and refresh tokens issued together at login, registration or refresh.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token expiry (Unix timestamp)
    pub expires_at: i64,
    /// Refresh token expiry (Unix timestamp)
    pub refresh_expires_at: i64,
    /// Always `Bearer`
    pub token_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_kind_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&TokenKind::Access).unwrap(), r#""access""#);
        assert_eq!(serde_json::to_string(&TokenKind::Refresh).unwrap(), r#""refresh""#);
    }

    #[test]
    fn test_claims_deserialize() {
        let id = Uuid::new_v4();
        let json = format!(
            r#"{{"sub":"{}","kind":"access","iss":"bahrululum","iat":1700000000,"exp":1700000900}}"#,
            id
        );
        let claims: Claims = serde_json::from_str(&json).unwrap();
        assert_eq!(claims.sub, id);
        assert_eq!(claims.kind, TokenKind::Access);
        assert_eq!(claims.exp - claims.iat, 900);
    }

    #[test]
    fn test_refresh_claims_require_jti() {
        let json = format!(
            r#"{{"sub":"{}","kind":"refresh","iss":"bahrululum","iat":1,"exp":2}}"#,
            Uuid::new_v4()
        );
        assert!(serde_json::from_str::<RefreshTokenClaims>(&json).is_err());
    }
}
