use anyhow::anyhow;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use bahrululum_core::AppError;
use bahrululum_db::map_write_error;
use bahrululum_models::Enrollment;

pub struct EnrollmentService;

impl EnrollmentService {
    /// Enrolls `user_id` in `course_id`.
    ///
    /// Both must exist and not be deleted (422); an existing live enrollment is a 409.
    #[instrument(skip(db))]
    pub async fn enroll(db: &PgPool, user_id: Uuid, course_id: Uuid) -> Result<Enrollment, AppError> {
        let (course_exists, user_exists) = sqlx::query_as::<_, (bool, bool)>(
            r#"SELECT
                   EXISTS (SELECT 1 FROM courses WHERE id = $1 AND deleted_at IS NULL),
                   EXISTS (SELECT 1 FROM users WHERE id = $2 AND deleted_at IS NULL)"#,
        )
        .bind(course_id)
        .bind(user_id)
        .fetch_one(db)
        .await?;

        if !course_exists {
            return Err(AppError::unprocessable(anyhow!("Course not found")));
        }
        if !user_exists {
            return Err(AppError::unprocessable(anyhow!("User not found")));
        }

        sqlx::query_as::<_, Enrollment>(
            r#"INSERT INTO enrollments (user_id, course_id)
               VALUES ($1, $2)
               RETURNING id, user_id, course_id, created_at, updated_at"#,
        )
        .bind(user_id)
        .bind(course_id)
        .fetch_one(db)
        .await
        .map_err(|e| {
            map_write_error(
                e,
                "User is already enrolled in this course",
                "Course or user not found",
            )
        })
    }

    #[instrument(skip(db))]
    pub async fn list_by_user(db: &PgPool, user_id: Uuid) -> Result<Vec<Enrollment>, AppError> {
        let enrollments = sqlx::query_as::<_, Enrollment>(
            r#"SELECT id, user_id, course_id, created_at, updated_at
               FROM enrollments
               WHERE user_id = $1 AND deleted_at IS NULL
               ORDER BY created_at DESC"#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await?;

        Ok(enrollments)
    }

    #[instrument(skip(db))]
    pub async fn list_by_course(db: &PgPool, course_id: Uuid) -> Result<Vec<Enrollment>, AppError> {
        let enrollments = sqlx::query_as::<_, Enrollment>(
            r#"SELECT id, user_id, course_id, created_at, updated_at
               FROM enrollments
               WHERE course_id = $1 AND deleted_at IS NULL
               ORDER BY created_at ASC"#,
        )
        .bind(course_id)
        .fetch_all(db)
        .await?;

        Ok(enrollments)
    }

    #[instrument(skip(db))]
    pub async fn unenroll(db: &PgPool, user_id: Uuid, course_id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"UPDATE enrollments
               SET deleted_at = NOW(), updated_at = NOW()
               WHERE user_id = $1 AND course_id = $2 AND deleted_at IS NULL"#,
        )
        .bind(user_id)
        .bind(course_id)
        .execute(db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow!("Enrollment not found")));
        }

        Ok(())
    }
}
