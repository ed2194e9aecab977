use anyhow::anyhow;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use bahrululum_core::{AppError, hash_password};
use bahrululum_db::map_write_error;
use bahrululum_models::{CreateUserRequest, UpdateUserRequest, User, UserRole};

const DUPLICATE_USER: &str = "User with this email or NIP already exists";

pub struct UserService;

impl UserService {
    /// Inserts a user with an already-validated role and a bcrypt hash of `password`.
    #[instrument(skip(db, password), fields(email = %email))]
    pub async fn insert_user(
        db: &PgPool,
        name: &str,
        email: &str,
        nip: &str,
        password: &str,
        role: UserRole,
    ) -> Result<User, AppError> {
        let hashed_password = hash_password(password)?;

        sqlx::query_as::<_, User>(
            r#"INSERT INTO users (name, email, nip, password, role)
               VALUES ($1, $2, $3, $4, $5)
               RETURNING id, name, email, nip, password, is_active, role, created_at, updated_at"#,
        )
        .bind(name)
        .bind(email)
        .bind(nip)
        .bind(&hashed_password)
        .bind(role.as_str())
        .fetch_one(db)
        .await
        .map_err(|e| map_write_error(e, DUPLICATE_USER, "Referenced record does not exist"))
    }

    #[instrument(skip(db, dto), fields(email = %dto.email, role = %dto.role))]
    pub async fn create_user(db: &PgPool, dto: CreateUserRequest) -> Result<User, AppError> {
        let role = UserRole::parse(&dto.role)
            .ok_or_else(|| AppError::bad_request(anyhow!("Invalid role: {}", dto.role)))?;

        Self::insert_user(db, &dto.name, &dto.email, &dto.nip, &dto.password, role).await
    }

    #[instrument(skip(db))]
    pub async fn list_users(db: &PgPool, offset: i64, limit: i64) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>(
            r#"SELECT id, name, email, nip, password, is_active, role, created_at, updated_at
               FROM users
               WHERE deleted_at IS NULL
               ORDER BY created_at DESC
               OFFSET $1 LIMIT $2"#,
        )
        .bind(offset)
        .bind(limit)
        .fetch_all(db)
        .await?;

        Ok(users)
    }

    #[instrument(skip(db))]
    pub async fn get_user_by_id(db: &PgPool, id: Uuid) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            r#"SELECT id, name, email, nip, password, is_active, role, created_at, updated_at
               FROM users
               WHERE id = $1 AND deleted_at IS NULL"#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow!("User not found")))
    }

    #[instrument(skip(db))]
    pub async fn find_by_nip(db: &PgPool, nip: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"SELECT id, name, email, nip, password, is_active, role, created_at, updated_at
               FROM users
               WHERE nip = $1 AND deleted_at IS NULL"#,
        )
        .bind(nip)
        .fetch_optional(db)
        .await?;

        Ok(user)
    }

    /// Applies the fields present in `dto`; absent fields keep their value.
    #[instrument(skip(db, dto))]
    pub async fn update_user(
        db: &PgPool,
        id: Uuid,
        dto: UpdateUserRequest,
    ) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            r#"UPDATE users
               SET name = COALESCE($2, name),
                   email = COALESCE($3, email),
                   is_active = COALESCE($4, is_active),
                   role = COALESCE($5, role),
                   updated_at = NOW()
               WHERE id = $1 AND deleted_at IS NULL
               RETURNING id, name, email, nip, password, is_active, role, created_at, updated_at"#,
        )
        .bind(id)
        .bind(dto.name)
        .bind(dto.email)
        .bind(dto.is_active)
        .bind(dto.role)
        .fetch_optional(db)
        .await
        .map_err(|e| map_write_error(e, DUPLICATE_USER, "Referenced record does not exist"))?
        .ok_or_else(|| AppError::not_found(anyhow!("User not found")))
    }

    #[instrument(skip(db))]
    pub async fn delete_user(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE users SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow!("User not found")));
        }

        Ok(())
    }
}
