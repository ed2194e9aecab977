//! # Bahrululum CLI
//!
//! Database administration and seeding used by the `bahrululum-cli` binary.
//!
//! - [`database`]: create/drop the database, run and inspect migrations
//! - [`seeder`]: the sample course catalogue and fake users
//!
//! ```ignore
//! use bahrululum_cli::seeder::{seed_catalogue, SeedTargets};
//!
//! seed_catalogue(&pool, SeedTargets::all()).await?;
//! ```

pub mod database;
pub mod seeder;
