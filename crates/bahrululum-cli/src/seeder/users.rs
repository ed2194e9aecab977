//! User seeding and admin creation.

use std::time::Instant;

use anyhow::{anyhow, bail};
use fake::Fake;
use fake::faker::name::en::{FirstName, LastName};
use rayon::prelude::*;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;
use validator::Validate;

use bahrululum_core::hash_password;
use bahrululum_models::{CreateUserRequest, UserRole};

/// Password given to every seeded account.
pub const SEED_PASSWORD: &str = "password123";

#[derive(Debug, Clone)]
pub struct UserSeed {
    pub name: String,
    pub email: String,
    pub nip: String,
    pub password_hash: String,
    pub role: UserRole,
}

/// Generates `count` fake users with `role`.
///
/// Each password is hashed separately (distinct salts), in parallel.
pub fn generate_users(role: UserRole, count: usize, password: &str) -> anyhow::Result<Vec<UserSeed>> {
    (0..count)
        .into_par_iter()
        .map(|idx| -> anyhow::Result<UserSeed> {
            let first_name: String = FirstName().fake();
            let last_name: String = LastName().fake();
            let nip: u64 = (100_000_000_000u64..1_000_000_000_000u64).fake();
            let password_hash = hash_password(password).map_err(|e| e.error)?;

            Ok(UserSeed {
                email: format!(
                    "{}.{}+{}{}@example.com",
                    first_name.to_lowercase(),
                    last_name.to_lowercase(),
                    role,
                    idx
                ),
                name: format!("{} {}", first_name, last_name),
                nip: nip.to_string(),
                password_hash,
                role,
            })
        })
        .collect()
}

/// Seeds mentors and regular users. Rows that collide on email or NIP are skipped.
pub async fn seed_users(db: &PgPool, mentors: usize, users: usize) -> anyhow::Result<usize> {
    let start_time = Instant::now();
    println!("👥 Seeding {} mentors and {} users...", mentors, users);

    let mut seeds = generate_users(UserRole::Mentor, mentors, SEED_PASSWORD)?;
    seeds.extend(generate_users(UserRole::User, users, SEED_PASSWORD)?);
    println!("   ✓ Generated and hashed {} accounts in {:?}", seeds.len(), start_time.elapsed());

    let inserted = insert_users_batch(db, &seeds).await?;
    println!(
        "   ✓ Inserted {} users in {:?} (password: {})",
        inserted.len(),
        start_time.elapsed(),
        SEED_PASSWORD
    );

    Ok(inserted.len())
}

pub async fn insert_users_batch(db: &PgPool, users: &[UserSeed]) -> anyhow::Result<Vec<Uuid>> {
    // 5 params per user
    const BATCH_SIZE: usize = 1000;

    let mut tx = db.begin().await?;
    let mut ids = Vec::with_capacity(users.len());

    for chunk in users.chunks(BATCH_SIZE) {
        ids.extend(insert_users_chunk(&mut tx, chunk).await?);
    }

    tx.commit().await?;
    Ok(ids)
}

async fn insert_users_chunk(
    tx: &mut Transaction<'_, Postgres>,
    users: &[UserSeed],
) -> anyhow::Result<Vec<Uuid>> {
    if users.is_empty() {
        return Ok(Vec::new());
    }

    let mut query = String::from("INSERT INTO users (name, email, nip, password, role) VALUES ");
    for i in 0..users.len() {
        if i > 0 {
            query.push_str(", ");
        }
        let p = i * 5;
        query.push_str(&format!(
            "(${}, ${}, ${}, ${}, ${})",
            p + 1,
            p + 2,
            p + 3,
            p + 4,
            p + 5
        ));
    }
    query.push_str(" ON CONFLICT DO NOTHING RETURNING id");

    let mut q = sqlx::query_scalar::<_, Uuid>(&query);
    for user in users {
        q = q
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.nip)
            .bind(&user.password_hash)
            .bind(user.role.as_str());
    }

    Ok(q.fetch_all(&mut **tx).await?)
}

/// Creates an administrator account after validating the input like the API does.
pub async fn create_admin(
    db: &PgPool,
    name: &str,
    email: &str,
    nip: &str,
    password: &str,
) -> anyhow::Result<Uuid> {
    let request = CreateUserRequest {
        name: name.to_string(),
        email: email.to_string(),
        nip: nip.to_string(),
        password: password.to_string(),
        role: UserRole::Admin.to_string(),
    };
    request
        .validate()
        .map_err(|e| anyhow!("Invalid admin details: {}", e))?;

    let password_hash = hash_password(password).map_err(|e| e.error)?;

    let id = sqlx::query_scalar::<_, Uuid>(
        r#"INSERT INTO users (name, email, nip, password, role)
           VALUES ($1, $2, $3, $4, $5)
           ON CONFLICT DO NOTHING
           RETURNING id"#,
    )
    .bind(name)
    .bind(email)
    .bind(nip)
    .bind(&password_hash)
    .bind(UserRole::Admin.as_str())
    .fetch_optional(db)
    .await?;

    match id {
        Some(id) => Ok(id),
        None => bail!("User with this email or NIP already exists"),
    }
}
