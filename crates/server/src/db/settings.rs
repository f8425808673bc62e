//! Site settings repository.
//!
//! A small key/value table for site-wide strings (title, tagline, social
//! links). Reads go through the cache on `AppState`; writes invalidate it.

use std::collections::HashMap;

use sqlx::PgPool;

use super::RepositoryError;
use crate::models::Setting;

/// Repository for site settings.
pub struct SettingsRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SettingsRepository<'a> {
    /// Create a new settings repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All settings as a key/value map.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_all(&self) -> Result<HashMap<String, String>, RepositoryError> {
        let rows = sqlx::query_as::<_, Setting>(
            "SELECT key, value, updated_at FROM settings ORDER BY key",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(|s| (s.key, s.value)).collect())
    }

    /// Upsert a batch of settings in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any statement fails.
    pub async fn upsert_many(
        &self,
        values: &HashMap<String, String>,
    ) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        for (key, value) in values {
            sqlx::query(
                "INSERT INTO settings (key, value)
                 VALUES ($1, $2)
                 ON CONFLICT (key) DO UPDATE
                 SET value = EXCLUDED.value, updated_at = now()",
            )
            .bind(key)
            .bind(value)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}
