//! Bearer token authentication.
//!
//! [`require_auth`] is the route layer: it verifies the access token and
//! stores an [`AuthUser`] in the request extensions. Handlers and the role
//! layer read it back through the [`AuthUser`] extractor.

use anyhow::anyhow;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header, request::Parts},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use bahrululum_auth::{Claims, verify_access_token};
use bahrululum_config::JwtConfig;
use bahrululum_core::AppError;

use crate::state::AppState;

/// Claims of a verified access token.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn user_id(&self) -> Uuid {
        self.0.sub
    }
}

/// Pulls the token out of `Authorization: Bearer <token>`.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| AppError::unauthorized(anyhow!("Missing authentication header")))?
        .to_str()
        .map_err(|_| AppError::unauthorized(anyhow!("Invalid authorization header format")))?;

    let token = value
        .split_once(' ')
        .filter(|(scheme, _)| *scheme == "Bearer")
        .map(|(_, token)| token)
        .ok_or_else(|| AppError::unauthorized(anyhow!("Invalid authorization header format")))?;

    let token = token.trim();
    if token.is_empty() {
        return Err(AppError::unauthorized(anyhow!("Missing token")));
    }

    Ok(token)
}

pub fn authenticate(headers: &HeaderMap, jwt_config: &JwtConfig) -> Result<AuthUser, AppError> {
    let token = bearer_token(headers)?;
    let claims = verify_access_token(token, jwt_config)?;
    Ok(AuthUser(claims))
}

/// Rejects requests without a valid access token.
///
/// ```ignore
/// Router::new()
///     .route("/me", get(me))
///     .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));
/// ```
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_user = authenticate(req.headers(), &state.jwt_config)?;
    tracing::Span::current().record("user_id", tracing::field::display(auth_user.user_id()));
    req.extensions_mut().insert(auth_user);
    Ok(next.run(req).await)
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or_else(|| AppError::unauthorized(anyhow!("User not authenticated")))
    }
}
