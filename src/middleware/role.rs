//! Role-based authorization.
//!
//! Runs after [`require_auth`](crate::middleware::auth::require_auth): the
//! user named by the token is loaded from the database and its role is
//! checked against an allow-list. Two styles are provided:
//!
//! 1. Route layers: [`require_roles`] and its presets ([`require_admin`],
//!    [`require_mentor_or_admin`], ...)
//! 2. Extractors: [`CurrentUser`] and the guards generated by
//!    [`require_role!`](crate::require_role) such as [`RequireMentorOrAdmin`]
//!
//! ```rust,ignore
//! Router::new()
//!     .route("/", get(list_users))
//!     .route_layer(middleware::from_fn_with_state(state.clone(), require_admin))
//!     .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));
//! ```

use anyhow::anyhow;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{StatusCode, request::Parts},
    middleware::Next,
    response::Response,
};

use bahrululum_core::AppError;
use bahrululum_models::{User, UserRole};

use crate::middleware::auth::AuthUser;
use crate::modules::users::service::UserService;
use crate::state::AppState;

/// The authenticated user's database record.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Loads the user behind an authenticated request.
///
/// A user that no longer exists (or was soft-deleted) is a 401, not a 404.
pub async fn load_current_user(state: &AppState, auth_user: &AuthUser) -> Result<User, AppError> {
    UserService::get_user_by_id(&state.db, auth_user.user_id())
        .await
        .map_err(|err| {
            if err.status == StatusCode::NOT_FOUND {
                AppError::unauthorized(anyhow!("User not found"))
            } else {
                err
            }
        })
}

pub fn check_any_role(user: &User, allowed_roles: &[UserRole]) -> Result<(), AppError> {
    if !user.has_any_role(allowed_roles) {
        tracing::warn!(
            user_id = %user.id,
            role = %user.role,
            ?allowed_roles,
            "Role check failed"
        );
        return Err(AppError::forbidden(anyhow!("Insufficient privileges")));
    }
    Ok(())
}

/// Admits the request only if the user's role is in `allowed_roles`.
///
/// On success the loaded [`CurrentUser`] is stored in the request extensions.
pub async fn require_roles(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
    allowed_roles: &[UserRole],
) -> Result<Response, AppError> {
    let auth_user = req
        .extensions()
        .get::<AuthUser>()
        .cloned()
        .ok_or_else(|| AppError::unauthorized(anyhow!("User not authenticated")))?;

    let user = load_current_user(&state, &auth_user).await?;
    check_any_role(&user, allowed_roles)?;

    req.extensions_mut().insert(CurrentUser(user));
    Ok(next.run(req).await)
}

pub async fn require_admin(
    state: State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    require_roles(state, req, next, &[UserRole::Admin]).await
}

pub async fn require_mentor(
    state: State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    require_roles(state, req, next, &[UserRole::Mentor]).await
}

pub async fn require_mentor_or_admin(
    state: State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    require_roles(state, req, next, &[UserRole::Mentor, UserRole::Admin]).await
}

pub async fn require_user(
    state: State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    require_roles(state, req, next, &[UserRole::User]).await
}

/// Any known role; still rejects users that no longer exist.
pub async fn require_any_role(
    state: State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    require_roles(state, req, next, &UserRole::ALL).await
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(current) = parts.extensions.get::<CurrentUser>() {
            return Ok(current.clone());
        }

        let auth_user = AuthUser::from_request_parts(parts, state).await?;
        let user = load_current_user(state, &auth_user).await?;
        parts.extensions.insert(CurrentUser(user.clone()));
        Ok(CurrentUser(user))
    }
}

/// Generates an extractor that admits only the listed roles.
#[macro_export]
macro_rules! require_role {
    ($name:ident, [$($role:expr),+ $(,)?]) => {
        #[derive(Debug, Clone)]
        pub struct $name(pub bahrululum_models::User);

        impl axum::extract::FromRequestParts<$crate::state::AppState> for $name {
            type Rejection = bahrululum_core::AppError;

            async fn from_request_parts(
                parts: &mut axum::http::request::Parts,
                state: &$crate::state::AppState,
            ) -> Result<Self, Self::Rejection> {
                let $crate::middleware::role::CurrentUser(user) =
                    $crate::middleware::role::CurrentUser::from_request_parts(parts, state).await?;

                $crate::middleware::role::check_any_role(&user, &[$($role),+])?;

                Ok($name(user))
            }
        }
    };
}

require_role!(RequireAdmin, [UserRole::Admin]);
require_role!(RequireMentorOrAdmin, [UserRole::Mentor, UserRole::Admin]);

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn user_with_role(role: &str) -> User {
        User {
            id: Uuid::new_v4(),
            name: "Role Test".to_string(),
            email: "role@test.com".to_string(),
            nip: "000000000001".to_string(),
            password: String::new(),
            is_active: true,
            role: role.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_check_any_role_allows_listed_role() {
        let mentor = user_with_role("mentor");
        assert!(check_any_role(&mentor, &[UserRole::Mentor, UserRole::Admin]).is_ok());
    }

    #[test]
    fn test_check_any_role_rejects_other_role() {
        let user = user_with_role("user");
        let err = check_any_role(&user, &[UserRole::Admin]).unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);
        assert_eq!(err.error.to_string(), "Insufficient privileges");
    }

    #[test]
    fn test_unknown_stored_role_is_rejected() {
        let user = user_with_role("superuser");
        assert!(check_any_role(&user, &UserRole::ALL).is_err());
    }
}
