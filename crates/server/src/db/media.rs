//! Media metadata repository.
//!
//! Only metadata lives here; the bytes are on the file system under the
//! configured upload directory.

use sqlx::PgPool;

use folio_core::MediaId;

use super::RepositoryError;
use crate::models::MediaItem;

/// Repository for uploaded media metadata.
pub struct MediaRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> MediaRepository<'a> {
    /// Create a new media repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Every media item, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<MediaItem>, RepositoryError> {
        let items = sqlx::query_as::<_, MediaItem>(
            "SELECT id, file_name, original_name, content_type, byte_size, uploaded_at
             FROM media_items
             ORDER BY uploaded_at DESC",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(items)
    }

    /// A media item by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: MediaId) -> Result<Option<MediaItem>, RepositoryError> {
        let item = sqlx::query_as::<_, MediaItem>(
            "SELECT id, file_name, original_name, content_type, byte_size, uploaded_at
             FROM media_items
             WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(item)
    }

    /// Record an uploaded file.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn create(
        &self,
        file_name: &str,
        original_name: &str,
        content_type: &str,
        byte_size: i64,
    ) -> Result<MediaItem, RepositoryError> {
        let item = sqlx::query_as::<_, MediaItem>(
            "INSERT INTO media_items (file_name, original_name, content_type, byte_size)
             VALUES ($1, $2, $3, $4)
             RETURNING id, file_name, original_name, content_type, byte_size, uploaded_at",
        )
        .bind(file_name)
        .bind(original_name)
        .bind(content_type)
        .bind(byte_size)
        .fetch_one(self.pool)
        .await?;

        Ok(item)
    }

    /// Remove a media row. Returns `true` if it existed. The caller is
    /// responsible for removing the file itself.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: MediaId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM media_items WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Total number of media items.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let (count,): (i64,) = sqlx::query_as("SELECT count(*) FROM media_items")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }
}
