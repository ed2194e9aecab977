use anyhow::anyhow;
use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use bahrululum_auth::{TokenPair, generate_token_pair, verify_refresh_token};
use bahrululum_config::JwtConfig;
use bahrululum_core::{AppError, verify_password};
use bahrululum_models::{
    LoginRequest, RefreshToken, RegisterRequest, TokenResponse, User, UserRole,
};

use crate::modules::users::service::UserService;

const INVALID_CREDENTIALS: &str = "Invalid credentials";
const INVALID_TOKEN: &str = "Invalid or expired token";

pub struct AuthService;

impl AuthService {
    /// Self-registration. The account always gets the `user` role.
    #[instrument(skip(db, dto, jwt_config), fields(nip = %dto.nip))]
    pub async fn register_user(
        db: &PgPool,
        dto: RegisterRequest,
        jwt_config: &JwtConfig,
    ) -> Result<TokenResponse, AppError> {
        let user = UserService::insert_user(
            db,
            &dto.name,
            &dto.email,
            &dto.nip,
            &dto.password,
            UserRole::User,
        )
        .await?;

        info!(user_id = %user.id, "User registered");
        Self::issue_tokens(db, user, jwt_config).await
    }

    #[instrument(skip(db, dto, jwt_config), fields(nip = %dto.nip))]
    pub async fn login_user(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<TokenResponse, AppError> {
        let user = UserService::find_by_nip(db, &dto.nip)
            .await?
            .ok_or_else(|| AppError::unauthorized(anyhow!(INVALID_CREDENTIALS)))?;

        if !verify_password(&dto.password, &user.password) {
            warn!(user_id = %user.id, "Login failed: wrong password");
            return Err(AppError::unauthorized(anyhow!(INVALID_CREDENTIALS)));
        }

        if !user.is_active {
            return Err(AppError::unauthorized(anyhow!("user account is inactive")));
        }

        Self::issue_tokens(db, user, jwt_config).await
    }

    /// Exchanges a stored refresh token for a new pair. The old token is retired.
    ///
    /// The stored row is locked for the rotation, so one token can be
    /// redeemed at most once even when requests race.
    #[instrument(skip_all)]
    pub async fn refresh_token(
        db: &PgPool,
        refresh_token: &str,
        jwt_config: &JwtConfig,
    ) -> Result<TokenResponse, AppError> {
        let claims = verify_refresh_token(refresh_token, jwt_config)?;

        // At most one pooled connection is held while the token row is locked.
        let user = UserService::get_user_by_id(db, claims.sub).await.ok();

        let mut tx = db.begin().await?;

        let stored = Self::lock_active_token(&mut tx, refresh_token)
            .await?
            .filter(|stored| stored.user_id == claims.sub && !stored.is_expired())
            .ok_or_else(|| AppError::unauthorized(anyhow!(INVALID_TOKEN)))?;

        let user = user.ok_or_else(|| AppError::unauthorized(anyhow!("User not found")))?;

        if !user.is_active {
            return Err(AppError::unauthorized(anyhow!("user account is inactive")));
        }

        let retired = sqlx::query(
            r#"UPDATE refresh_tokens
               SET deleted_at = NOW(), updated_at = NOW()
               WHERE id = $1 AND deleted_at IS NULL"#,
        )
        .bind(stored.id)
        .execute(&mut *tx)
        .await?;

        if retired.rows_affected() == 0 {
            warn!(user_id = %user.id, "Refresh token already rotated");
            return Err(AppError::unauthorized(anyhow!(INVALID_TOKEN)));
        }

        let pair = generate_token_pair(user.id, jwt_config)?;
        Self::store_refresh_token(&mut tx, user.id, &pair).await?;
        tx.commit().await?;

        info!(user_id = %user.id, "Refresh token rotated");
        Ok(TokenResponse::new(pair, user))
    }

    #[instrument(skip_all)]
    pub async fn logout(db: &PgPool, refresh_token: &str) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"UPDATE refresh_tokens
               SET deleted_at = NOW(), updated_at = NOW()
               WHERE token = $1 AND deleted_at IS NULL"#,
        )
        .bind(refresh_token)
        .execute(db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::unauthorized(anyhow!("Invalid refresh token")));
        }

        Ok(())
    }

    async fn issue_tokens(
        db: &PgPool,
        user: User,
        jwt_config: &JwtConfig,
    ) -> Result<TokenResponse, AppError> {
        let pair = generate_token_pair(user.id, jwt_config)?;

        let mut conn = db.acquire().await?;
        Self::store_refresh_token(&mut conn, user.id, &pair).await?;

        Ok(TokenResponse::new(pair, user))
    }

    async fn store_refresh_token(
        conn: &mut PgConnection,
        user_id: Uuid,
        pair: &TokenPair,
    ) -> Result<(), AppError> {
        let expires_at = DateTime::<Utc>::from_timestamp(pair.refresh_expires_at, 0)
            .ok_or_else(|| AppError::internal(anyhow!("Refresh token expiry out of range")))?;

        sqlx::query(
            "INSERT INTO refresh_tokens (user_id, token, expires_at) VALUES ($1, $2, $3)",
        )
        .bind(user_id)
        .bind(&pair.refresh_token)
        .bind(expires_at)
        .execute(conn)
        .await?;

        Ok(())
    }

    /// Fetches a live token row and holds a row lock on it until the
    /// transaction ends. A concurrent rotation blocks here, then sees the
    /// row as deleted.
    async fn lock_active_token(
        conn: &mut PgConnection,
        token: &str,
    ) -> Result<Option<RefreshToken>, AppError> {
        let stored = sqlx::query_as::<_, RefreshToken>(
            r#"SELECT id, user_id, token, expires_at, created_at, updated_at
               FROM refresh_tokens
               WHERE token = $1 AND deleted_at IS NULL
               FOR UPDATE"#,
        )
        .bind(token)
        .fetch_optional(conn)
        .await?;

        Ok(stored)
    }
}
