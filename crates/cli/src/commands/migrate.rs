//! Database migration commands.
//!
//! Migration files live in `crates/server/migrations/` and are embedded
//! into this binary at compile time, so `migrate run` needs no source tree
//! on the machine it runs on.
//!
//! # Environment Variables
//!
//! - `FOLIO_DATABASE_URL` - `PostgreSQL` connection string (falls back to
//!   `DATABASE_URL`)

use secrecy::{ExposeSecret, SecretString};
use sqlx::PgPool;
use thiserror::Error;

/// Migrations embedded from the server crate.
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../server/migrations");

/// Errors that can occur while running migrations.
#[derive(Debug, Error)]
pub enum MigrationError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database connection error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration execution error.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

fn database_url() -> Result<SecretString, MigrationError> {
    dotenvy::dotenv().ok();

    std::env::var("FOLIO_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| MigrationError::MissingEnvVar("FOLIO_DATABASE_URL"))
}

/// Apply all pending migrations.
///
/// # Errors
///
/// Returns `MigrationError` if the database is unreachable or a migration
/// fails to apply.
pub async fn run() -> Result<(), MigrationError> {
    let url = database_url()?;

    tracing::info!("Connecting to database...");
    let pool = PgPool::connect(url.expose_secret()).await?;

    tracing::info!("Running migrations...");
    MIGRATOR.run(&pool).await?;

    tracing::info!("Migrations complete");
    Ok(())
}

/// Show each known migration and whether it has been applied.
///
/// # Errors
///
/// Returns `MigrationError` if the database is unreachable.
pub async fn status() -> Result<(), MigrationError> {
    let url = database_url()?;
    let pool = PgPool::connect(url.expose_secret()).await?;

    // Empty on a fresh database where the bookkeeping table does not exist yet
    let applied: Vec<i64> =
        sqlx::query_scalar("SELECT version FROM _sqlx_migrations ORDER BY version")
            .fetch_all(&pool)
            .await
            .unwrap_or_default();

    for migration in MIGRATOR.iter() {
        let state = if applied.contains(&migration.version) {
            "applied"
        } else {
            "pending"
        };
        tracing::info!(
            "{} {} [{}]",
            migration.version,
            migration.description,
            state
        );
    }

    Ok(())
}
