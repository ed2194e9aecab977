use anyhow::anyhow;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use bahrululum_core::AppError;
use bahrululum_models::chapters::normalize_order;
use bahrululum_models::{Chapter, ChapterWithContents, CreateChapterRequest, UpdateChapterRequest};

use crate::modules::contents::service::ContentService;

pub struct ChapterService;

impl ChapterService {
    /// Creates a chapter under a live course; a missing or deleted course is a 422.
    #[instrument(skip(db, dto), fields(course_id = %dto.course_id))]
    pub async fn create_chapter(
        db: &PgPool,
        dto: CreateChapterRequest,
    ) -> Result<Chapter, AppError> {
        let chapter_order = dto.effective_order();

        sqlx::query_as::<_, Chapter>(
            r#"INSERT INTO course_chapters (course_id, title, description, chapter_order, is_published)
               SELECT $1, $2, $3, $4, $5
               WHERE EXISTS (SELECT 1 FROM courses WHERE id = $1 AND deleted_at IS NULL)
               RETURNING id, course_id, title, description, chapter_order, is_published,
                         created_at, updated_at"#,
        )
        .bind(dto.course_id)
        .bind(&dto.title)
        .bind(&dto.description)
        .bind(chapter_order)
        .bind(dto.is_published)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::unprocessable(anyhow!("Course not found")))
    }

    /// Chapters of a course in `chapter_order`.
    #[instrument(skip(db))]
    pub async fn list_by_course(db: &PgPool, course_id: Uuid) -> Result<Vec<Chapter>, AppError> {
        let chapters = sqlx::query_as::<_, Chapter>(
            r#"SELECT id, course_id, title, description, chapter_order, is_published,
                      created_at, updated_at
               FROM course_chapters
               WHERE course_id = $1 AND deleted_at IS NULL
               ORDER BY chapter_order ASC, created_at ASC"#,
        )
        .bind(course_id)
        .fetch_all(db)
        .await?;

        Ok(chapters)
    }

    #[instrument(skip(db))]
    pub async fn get_chapter(db: &PgPool, id: Uuid) -> Result<Chapter, AppError> {
        sqlx::query_as::<_, Chapter>(
            r#"SELECT id, course_id, title, description, chapter_order, is_published,
                      created_at, updated_at
               FROM course_chapters
               WHERE id = $1 AND deleted_at IS NULL"#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow!("Chapter not found")))
    }

    #[instrument(skip(db))]
    pub async fn get_chapter_with_contents(
        db: &PgPool,
        id: Uuid,
    ) -> Result<ChapterWithContents, AppError> {
        let chapter = Self::get_chapter(db, id).await?;
        let contents = ContentService::list_by_chapter(db, chapter.id).await?;

        Ok(ChapterWithContents { chapter, contents })
    }

    #[instrument(skip(db, dto))]
    pub async fn update_chapter(
        db: &PgPool,
        id: Uuid,
        dto: UpdateChapterRequest,
    ) -> Result<Chapter, AppError> {
        let chapter_order = dto.chapter_order.map(|order| normalize_order(Some(order)));

        sqlx::query_as::<_, Chapter>(
            r#"UPDATE course_chapters
               SET title = COALESCE($2, title),
                   description = COALESCE($3, description),
                   chapter_order = COALESCE($4, chapter_order),
                   is_published = COALESCE($5, is_published),
                   updated_at = NOW()
               WHERE id = $1 AND deleted_at IS NULL
               RETURNING id, course_id, title, description, chapter_order, is_published,
                         created_at, updated_at"#,
        )
        .bind(id)
        .bind(dto.title)
        .bind(dto.description)
        .bind(chapter_order)
        .bind(dto.is_published)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow!("Chapter not found")))
    }

    #[instrument(skip(db))]
    pub async fn delete_chapter(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE course_chapters SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow!("Chapter not found")));
        }

        Ok(())
    }
}
