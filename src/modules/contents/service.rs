use anyhow::anyhow;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use bahrululum_core::AppError;
use bahrululum_models::chapters::normalize_order;
use bahrululum_models::{Content, CreateContentRequest, UpdateContentRequest};

pub struct ContentService;

impl ContentService {
    /// Creates a content item under a live chapter; a missing or deleted chapter is a 422.
    #[instrument(skip(db, dto), fields(chapter_id = %dto.chapter_id, content_type = %dto.content_type))]
    pub async fn create_content(
        db: &PgPool,
        dto: CreateContentRequest,
    ) -> Result<Content, AppError> {
        let content_order = dto.effective_order();

        sqlx::query_as::<_, Content>(
            r#"INSERT INTO course_contents
                   (chapter_id, title, description, content_type, file_url, content_text,
                    content_order, is_published, duration_minutes)
               SELECT $1, $2, $3, $4, $5, $6, $7, $8, $9
               WHERE EXISTS (SELECT 1 FROM course_chapters WHERE id = $1 AND deleted_at IS NULL)
               RETURNING id, chapter_id, title, description, content_type, file_url, content_text,
                         content_order, is_published, duration_minutes, created_at, updated_at"#,
        )
        .bind(dto.chapter_id)
        .bind(&dto.title)
        .bind(&dto.description)
        .bind(&dto.content_type)
        .bind(&dto.file_url)
        .bind(&dto.content_text)
        .bind(content_order)
        .bind(dto.is_published)
        .bind(dto.duration_minutes.unwrap_or(0))
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::unprocessable(anyhow!("Chapter not found")))
    }

    /// Contents of a chapter in `content_order`.
    #[instrument(skip(db))]
    pub async fn list_by_chapter(db: &PgPool, chapter_id: Uuid) -> Result<Vec<Content>, AppError> {
        let contents = sqlx::query_as::<_, Content>(
            r#"SELECT id, chapter_id, title, description, content_type, file_url, content_text,
                      content_order, is_published, duration_minutes, created_at, updated_at
               FROM course_contents
               WHERE chapter_id = $1 AND deleted_at IS NULL
               ORDER BY content_order ASC, created_at ASC"#,
        )
        .bind(chapter_id)
        .fetch_all(db)
        .await?;

        Ok(contents)
    }

    #[instrument(skip(db))]
    pub async fn list_by_type(db: &PgPool, content_type: &str) -> Result<Vec<Content>, AppError> {
        let contents = sqlx::query_as::<_, Content>(
            r#"SELECT id, chapter_id, title, description, content_type, file_url, content_text,
                      content_order, is_published, duration_minutes, created_at, updated_at
               FROM course_contents
               WHERE content_type = $1 AND deleted_at IS NULL
               ORDER BY created_at ASC"#,
        )
        .bind(content_type)
        .fetch_all(db)
        .await?;

        Ok(contents)
    }

    #[instrument(skip(db))]
    pub async fn get_content(db: &PgPool, id: Uuid) -> Result<Content, AppError> {
        sqlx::query_as::<_, Content>(
            r#"SELECT id, chapter_id, title, description, content_type, file_url, content_text,
                      content_order, is_published, duration_minutes, created_at, updated_at
               FROM course_contents
               WHERE id = $1 AND deleted_at IS NULL"#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow!("Content not found")))
    }

    #[instrument(skip(db, dto))]
    pub async fn update_content(
        db: &PgPool,
        id: Uuid,
        dto: UpdateContentRequest,
    ) -> Result<Content, AppError> {
        let content_order = dto.content_order.map(|order| normalize_order(Some(order)));

        sqlx::query_as::<_, Content>(
            r#"UPDATE course_contents
               SET title = COALESCE($2, title),
                   description = COALESCE($3, description),
                   content_type = COALESCE($4, content_type),
                   file_url = COALESCE($5, file_url),
                   content_text = COALESCE($6, content_text),
                   content_order = COALESCE($7, content_order),
                   is_published = COALESCE($8, is_published),
                   duration_minutes = COALESCE($9, duration_minutes),
                   updated_at = NOW()
               WHERE id = $1 AND deleted_at IS NULL
               RETURNING id, chapter_id, title, description, content_type, file_url, content_text,
                         content_order, is_published, duration_minutes, created_at, updated_at"#,
        )
        .bind(id)
        .bind(dto.title)
        .bind(dto.description)
        .bind(dto.content_type)
        .bind(dto.file_url)
        .bind(dto.content_text)
        .bind(content_order)
        .bind(dto.is_published)
        .bind(dto.duration_minutes)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow!("Content not found")))
    }

    #[instrument(skip(db))]
    pub async fn delete_content(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE course_contents SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow!("Content not found")));
        }

        Ok(())
    }
}
