//! Course catalogue seeding.
//!
//! Every step is idempotent: a course is matched by name, a chapter by
//! (course, title) and a content item by (chapter, title).

use std::time::Instant;

use sqlx::PgPool;
use uuid::Uuid;

use super::catalogue::CATALOGUE;

pub async fn seed_courses(db: &PgPool) -> anyhow::Result<usize> {
    let start_time = Instant::now();
    println!("📚 Seeding courses...");

    let mut created = 0;
    for course in CATALOGUE {
        let existing = find_course(db, course.name).await?;
        if existing.is_some() {
            println!("   - Course '{}' already exists, skipping", course.name);
            continue;
        }

        sqlx::query("INSERT INTO courses (name, description) VALUES ($1, $2)")
            .bind(course.name)
            .bind(course.description)
            .execute(db)
            .await?;
        created += 1;
    }

    println!("   ✓ Created {} courses in {:?}", created, start_time.elapsed());
    Ok(created)
}

pub async fn seed_chapters(db: &PgPool) -> anyhow::Result<usize> {
    let start_time = Instant::now();
    println!("📖 Seeding course chapters...");

    let mut created = 0;
    for course in CATALOGUE {
        let Some(course_id) = find_course(db, course.name).await? else {
            println!("   ! Course '{}' not found, run with --courses first", course.name);
            continue;
        };

        for chapter in course.chapters {
            if find_chapter(db, course_id, chapter.title).await?.is_some() {
                println!("   - Chapter '{}' already exists, skipping", chapter.title);
                continue;
            }

            sqlx::query(
                r#"INSERT INTO course_chapters (course_id, title, description, chapter_order, is_published)
                   VALUES ($1, $2, $3, $4, $5)"#,
            )
            .bind(course_id)
            .bind(chapter.title)
            .bind(chapter.description)
            .bind(chapter.order)
            .bind(chapter.published)
            .execute(db)
            .await?;
            created += 1;
        }
    }

    println!("   ✓ Created {} chapters in {:?}", created, start_time.elapsed());
    Ok(created)
}

pub async fn seed_contents(db: &PgPool) -> anyhow::Result<usize> {
    let start_time = Instant::now();
    println!("🎬 Seeding course contents...");

    let mut created = 0;
    for course in CATALOGUE {
        let Some(course_id) = find_course(db, course.name).await? else {
            continue;
        };

        for chapter in course.chapters {
            let Some(chapter_id) = find_chapter(db, course_id, chapter.title).await? else {
                println!("   ! Chapter '{}' not found, run with --chapters first", chapter.title);
                continue;
            };

            for content in chapter.contents {
                let exists = sqlx::query_scalar::<_, bool>(
                    r#"SELECT EXISTS (
                           SELECT 1 FROM course_contents
                           WHERE chapter_id = $1 AND title = $2 AND deleted_at IS NULL
                       )"#,
                )
                .bind(chapter_id)
                .bind(content.title)
                .fetch_one(db)
                .await?;

                if exists {
                    println!("   - Content '{}' already exists, skipping", content.title);
                    continue;
                }

                sqlx::query(
                    r#"INSERT INTO course_contents
                           (chapter_id, title, description, content_type, file_url, content_text,
                            content_order, is_published, duration_minutes)
                       VALUES ($1, $2, $3, $4, $5, $6, $7, TRUE, $8)"#,
                )
                .bind(chapter_id)
                .bind(content.title)
                .bind(content.description)
                .bind(content.content_type)
                .bind(content.file_url)
                .bind(content.content_text)
                .bind(content.order)
                .bind(content.duration_minutes)
                .execute(db)
                .await?;
                created += 1;
            }
        }
    }

    println!("   ✓ Created {} contents in {:?}", created, start_time.elapsed());
    Ok(created)
}

/// Rows removed by [`clean_catalogue`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CleanSummary {
    pub courses: u64,
    pub chapters: u64,
    pub contents: u64,
    pub enrollments: u64,
}

/// Hard-deletes the catalogue courses (matched by name) together with their
/// chapters, contents and enrollments. Courses created through the API are
/// left alone.
pub async fn clean_catalogue(db: &PgPool) -> anyhow::Result<CleanSummary> {
    println!("🗑️  Cleaning course catalogue...");

    let names: Vec<&str> = CATALOGUE.iter().map(|course| course.name).collect();

    let mut tx = db.begin().await?;

    let course_ids = sqlx::query_scalar::<_, Uuid>("SELECT id FROM courses WHERE name = ANY($1)")
        .bind(&names)
        .fetch_all(&mut *tx)
        .await?;

    let contents = sqlx::query(
        r#"DELETE FROM course_contents
           WHERE chapter_id IN (SELECT id FROM course_chapters WHERE course_id = ANY($1))"#,
    )
    .bind(&course_ids)
    .execute(&mut *tx)
    .await?
    .rows_affected();

    let chapters = sqlx::query("DELETE FROM course_chapters WHERE course_id = ANY($1)")
        .bind(&course_ids)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    let enrollments = sqlx::query("DELETE FROM enrollments WHERE course_id = ANY($1)")
        .bind(&course_ids)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    let courses = sqlx::query("DELETE FROM courses WHERE id = ANY($1)")
        .bind(&course_ids)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    tx.commit().await?;

    Ok(CleanSummary {
        courses,
        chapters,
        contents,
        enrollments,
    })
}

async fn find_course(db: &PgPool, name: &str) -> anyhow::Result<Option<Uuid>> {
    let id = sqlx::query_scalar::<_, Uuid>(
        "SELECT id FROM courses WHERE name = $1 AND deleted_at IS NULL ORDER BY created_at LIMIT 1",
    )
    .bind(name)
    .fetch_optional(db)
    .await?;

    Ok(id)
}

async fn find_chapter(db: &PgPool, course_id: Uuid, title: &str) -> anyhow::Result<Option<Uuid>> {
    let id = sqlx::query_scalar::<_, Uuid>(
        r#"SELECT id FROM course_chapters
           WHERE course_id = $1 AND title = $2 AND deleted_at IS NULL
           ORDER BY created_at LIMIT 1"#,
    )
    .bind(course_id)
    .bind(title)
    .fetch_optional(db)
    .await?;

    Ok(id)
}
