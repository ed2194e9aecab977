use std::path::PathBuf;

use bahrululum_cli::database::{self, MigrationStatus};
use bahrululum_cli::seeder::{self, SeedTargets};
use bahrululum_config::DatabaseConfig;
use bahrululum_db::{PgPool, init_db_pool};
use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;

#[derive(Parser)]
#[command(name = "bahrululum-cli")]
#[command(about = "Bahrululum CLI - Database administration and seeding", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the application database if it does not exist
    CreateDb,
    /// Drop the application database (terminates open connections)
    DropDb,
    /// Apply pending migrations
    Migrate,
    /// Show which migrations have been applied
    MigrateStatus,
    /// Roll back the most recently applied migration
    MigrateDown,
    /// Roll back every applied migration
    MigrateReset,
    /// Print the current schema version
    MigrateVersion,
    /// Create an empty up/down migration pair named with the current timestamp
    MigrateCreate {
        /// Short description, e.g. "add course tags"
        name: String,

        /// Directory holding the migration files
        #[arg(long, default_value = "migrations")]
        dir: PathBuf,
    },
    /// Seed the sample course catalogue (everything when no flag is given)
    Seed {
        /// Seed courses
        #[arg(long)]
        courses: bool,

        /// Seed chapters for the seeded courses
        #[arg(long)]
        chapters: bool,

        /// Seed contents for the seeded chapters
        #[arg(long)]
        contents: bool,

        /// Seed courses, chapters and contents
        #[arg(long)]
        all: bool,

        /// Delete the sample catalogue before seeding
        #[arg(long)]
        clean: bool,
    },
    /// Seed fake mentors and users (password: password123)
    SeedUsers {
        /// Number of mentors to create
        #[arg(short = 'm', long, default_value = "3")]
        mentors: usize,

        /// Number of regular users to create
        #[arg(short = 'u', long, default_value = "20")]
        users: usize,
    },
    /// Create an administrator account
    CreateAdmin {
        /// Full name
        #[arg(short = 'n', long)]
        name: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Employee number (login identifier)
        #[arg(long)]
        nip: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();
    let config = DatabaseConfig::from_env();

    if let Err(e) = run(cli.command, &config).await {
        eprintln!("\n❌ {:#}", e);
        std::process::exit(1);
    }
}

async fn run(command: Commands, config: &DatabaseConfig) -> anyhow::Result<()> {
    match command {
        Commands::CreateDb => {
            if database::create_database(config).await? {
                println!("✅ Created database '{}'", config.database_name());
            } else {
                println!("ℹ️  Database '{}' already exists", config.database_name());
            }
        }
        Commands::DropDb => {
            if database::drop_database(config).await? {
                println!("✅ Dropped database '{}'", config.database_name());
            } else {
                println!("ℹ️  Database '{}' does not exist", config.database_name());
            }
        }
        Commands::Migrate => {
            let pool = connect(config).await?;
            database::run_migrations(&pool).await?;
            println!("✅ Migrations applied");
        }
        Commands::MigrateStatus => {
            let pool = connect(config).await?;
            print_migration_status(&database::migration_status(&pool).await?);
        }
        Commands::MigrateDown => {
            let pool = connect(config).await?;
            match database::rollback_last(&pool).await? {
                Some(version) => println!("✅ Rolled back migration {}", version),
                None => println!("ℹ️  No migrations to roll back"),
            }
        }
        Commands::MigrateReset => {
            let pool = connect(config).await?;
            let reverted = database::reset_migrations(&pool).await?;
            println!("✅ Rolled back {} migrations", reverted);
        }
        Commands::MigrateVersion => {
            let pool = connect(config).await?;
            match database::current_version(&pool).await? {
                Some(version) => println!("Current version: {}", version),
                None => println!("Current version: 0 (no migrations applied)"),
            }
        }
        Commands::MigrateCreate { name, dir } => {
            let (up, down) = database::create_migration(&dir, &name)?;
            println!("✅ Created {}", up.display());
            println!("✅ Created {}", down.display());
        }
        Commands::Seed {
            courses,
            chapters,
            contents,
            all,
            clean,
        } => {
            let pool = connect(config).await?;
            if clean {
                let removed = seeder::clean_catalogue(&pool).await?;
                println!(
                    "🧹 Removed {} catalogue courses with {} chapters, {} contents and {} enrollments",
                    removed.courses, removed.chapters, removed.contents, removed.enrollments
                );
            }
            let targets = SeedTargets::from_flags(all, courses, chapters, contents);
            seeder::seed_catalogue(&pool, targets).await?;
        }
        Commands::SeedUsers { mentors, users } => {
            let pool = connect(config).await?;
            let created = seeder::seed_users(&pool, mentors, users).await?;
            println!("✅ Created {} users", created);
        }
        Commands::CreateAdmin {
            name,
            email,
            nip,
            password,
        } => {
            let pool = connect(config).await?;
            handle_create_admin(&pool, name, email, nip, password).await?;
        }
    }

    Ok(())
}

async fn connect(config: &DatabaseConfig) -> anyhow::Result<PgPool> {
    Ok(init_db_pool(config).await?)
}

fn print_migration_status(migrations: &[MigrationStatus]) {
    if migrations.is_empty() {
        println!("No migrations found");
        return;
    }

    for m in migrations {
        let marker = if m.applied { "✅" } else { "⏳" };
        println!("{} {} {}", marker, m.version, m.description);
    }

    let pending = migrations.iter().filter(|m| !m.applied).count();
    println!("\n{} applied, {} pending", migrations.len() - pending, pending);
}

async fn handle_create_admin(
    pool: &PgPool,
    name: Option<String>,
    email: Option<String>,
    nip: Option<String>,
    password: Option<String>,
) -> anyhow::Result<()> {
    let name = match name {
        Some(name) => name,
        None => Input::new().with_prompt("Full name").interact_text()?,
    };

    let email = match email {
        Some(email) => email,
        None => Input::new().with_prompt("Email address").interact_text()?,
    };

    let nip = match nip {
        Some(nip) => nip,
        None => Input::new().with_prompt("NIP").interact_text()?,
    };

    let password = match password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()?,
    };

    let id = seeder::create_admin(pool, &name, &email, &nip, &password).await?;

    println!("\n✅ Admin created successfully!");
    println!("   ID: {}", id);
    println!("   Name: {}", name);
    println!("   Email: {}", email);
    println!("   NIP: {}", nip);
    Ok(())
}
