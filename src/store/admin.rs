//! Read-side adapter over the admins table.

use sqlx::SqlitePool;

use crate::auth::password::hash_password;
use crate::config::BootstrapConfig;

/// Full admin row. `password_hash` never leaves the server process; handlers
/// serialize `AdminPublic` projections instead.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Admin {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: String,
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Admin>, sqlx::Error> {
    sqlx::query_as::<_, Admin>(
        "SELECT id, email, password_hash, role, created_at FROM admins WHERE id = ?1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn find_by_email(pool: &SqlitePool, email: &str) -> Result<Option<Admin>, sqlx::Error> {
    sqlx::query_as::<_, Admin>(
        "SELECT id, email, password_hash, role, created_at FROM admins WHERE email = ?1",
    )
    .bind(email)
    .fetch_optional(pool)
    .await
}

/// Create the configured first admin iff no admin exists yet.
///
/// Safe to run on every startup; a populated table makes this a no-op.
pub async fn bootstrap_admin(pool: &SqlitePool, config: &BootstrapConfig) -> anyhow::Result<()> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM admins")
        .fetch_one(pool)
        .await?;

    if count > 0 {
        tracing::debug!(admins = count, "Admin accounts present, skipping bootstrap");
        return Ok(());
    }

    if config.email.is_empty() || config.password.is_empty() {
        tracing::warn!(
            "No admin accounts exist and no bootstrap credentials configured; \
             the admin console will be unreachable"
        );
        return Ok(());
    }

    let password_hash = hash_password(&config.password)?;

    sqlx::query("INSERT INTO admins (email, password_hash, role) VALUES (?1, ?2, ?3)")
        .bind(&config.email)
        .bind(&password_hash)
        .bind(&config.role)
        .execute(pool)
        .await?;

    tracing::info!(email = %config.email, role = %config.role, "Bootstrapped first admin account");

    Ok(())
}
