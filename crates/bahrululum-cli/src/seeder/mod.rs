//! Database seeding.
//!
//! - [`catalogue`]: the fixed sample catalogue (3 courses with chapters and contents)
//! - [`courses`]: idempotent catalogue seeding and cleanup
//! - [`users`]: fake mentors/users and admin creation

pub mod catalogue;
pub mod courses;
pub mod users;

use std::time::Instant;

use sqlx::PgPool;

pub use courses::{CleanSummary, clean_catalogue, seed_chapters, seed_contents, seed_courses};
pub use users::{create_admin, seed_users};

/// Which parts of the catalogue to seed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedTargets {
    pub courses: bool,
    pub chapters: bool,
    pub contents: bool,
}

impl SeedTargets {
    pub fn all() -> Self {
        Self {
            courses: true,
            chapters: true,
            contents: true,
        }
    }

    /// Builds targets from CLI flags; no flag at all means everything.
    pub fn from_flags(all: bool, courses: bool, chapters: bool, contents: bool) -> Self {
        if all || !(courses || chapters || contents) {
            return Self::all();
        }
        Self {
            courses,
            chapters,
            contents,
        }
    }
}

pub async fn seed_catalogue(db: &PgPool, targets: SeedTargets) -> anyhow::Result<()> {
    let start_time = Instant::now();

    if targets.courses {
        seed_courses(db).await?;
    }
    if targets.chapters {
        seed_chapters(db).await?;
    }
    if targets.contents {
        seed_contents(db).await?;
    }

    println!("\n✅ Seeding completed in {:?}", start_time.elapsed());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_flags_means_all() {
        assert_eq!(SeedTargets::from_flags(false, false, false, false), SeedTargets::all());
        assert_eq!(SeedTargets::from_flags(true, true, false, false), SeedTargets::all());
    }

    #[test]
    fn test_single_flag() {
        let targets = SeedTargets::from_flags(false, false, true, false);
        assert!(!targets.courses);
        assert!(targets.chapters);
        assert!(!targets.contents);
    }
}
