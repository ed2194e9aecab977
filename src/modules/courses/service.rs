use anyhow::anyhow;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use bahrululum_core::AppError;
use bahrululum_db::map_write_error;
use bahrululum_models::{Course, CreateCourseRequest};

pub struct CourseService;

impl CourseService {
    #[instrument(skip(db, dto), fields(name = %dto.name))]
    pub async fn create_course(db: &PgPool, dto: CreateCourseRequest) -> Result<Course, AppError> {
        sqlx::query_as::<_, Course>(
            r#"INSERT INTO courses (name, description)
               VALUES ($1, $2)
               RETURNING id, name, description, created_at, updated_at"#,
        )
        .bind(&dto.name)
        .bind(&dto.description)
        .fetch_one(db)
        .await
        .map_err(|e| map_write_error(e, "Course already exists", "Referenced record does not exist"))
    }

    #[instrument(skip(db))]
    pub async fn list_courses(db: &PgPool, offset: i64, limit: i64) -> Result<Vec<Course>, AppError> {
        let courses = sqlx::query_as::<_, Course>(
            r#"SELECT id, name, description, created_at, updated_at
               FROM courses
               WHERE deleted_at IS NULL
               ORDER BY created_at DESC
               OFFSET $1 LIMIT $2"#,
        )
        .bind(offset)
        .bind(limit)
        .fetch_all(db)
        .await?;

        Ok(courses)
    }

    #[instrument(skip(db))]
    pub async fn get_course(db: &PgPool, id: Uuid) -> Result<Course, AppError> {
        sqlx::query_as::<_, Course>(
            r#"SELECT id, name, description, created_at, updated_at
               FROM courses
               WHERE id = $1 AND deleted_at IS NULL"#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow!("Course not found")))
    }

    #[instrument(skip(db, dto))]
    pub async fn update_course(
        db: &PgPool,
        id: Uuid,
        dto: CreateCourseRequest,
    ) -> Result<Course, AppError> {
        sqlx::query_as::<_, Course>(
            r#"UPDATE courses
               SET name = $2, description = $3, updated_at = NOW()
               WHERE id = $1 AND deleted_at IS NULL
               RETURNING id, name, description, created_at, updated_at"#,
        )
        .bind(id)
        .bind(&dto.name)
        .bind(&dto.description)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow!("Course not found")))
    }

    #[instrument(skip(db))]
    pub async fn delete_course(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE courses SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow!("Course not found")));
        }

        Ok(())
    }
}
