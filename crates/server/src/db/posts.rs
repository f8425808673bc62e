//! Blog post repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use folio_core::{PostId, PublishStatus};

use super::{RepositoryError, map_unique_violation};
use crate::models::Post;

/// Fields written on create/update.
#[derive(Debug, Clone)]
pub struct PostInput {
    pub slug: String,
    pub title: String,
    pub excerpt: Option<String>,
    pub body: String,
    pub tags: Vec<String>,
    pub status: PublishStatus,
    pub scheduled_for: Option<DateTime<Utc>>,
    /// Explicit publication timestamp; only the import path sets this.
    /// `None` with a `published` status stamps the current time.
    pub published_at: Option<DateTime<Utc>>,
}

const POST_COLUMNS: &str = "id, slug, title, excerpt, body, tags, status, \
                            published_at, scheduled_for, created_at, updated_at";

/// Repository for blog post database operations.
pub struct PostRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PostRepository<'a> {
    /// Create a new post repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Published posts, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_published(&self) -> Result<Vec<Post>, RepositoryError> {
        let posts = sqlx::query_as::<_, Post>(&format!(
            "SELECT {POST_COLUMNS} FROM posts
             WHERE status = 'published'
             ORDER BY published_at DESC NULLS LAST"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(posts)
    }

    /// A published post by slug; drafts and scheduled posts are not visible.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_published_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<Post>, RepositoryError> {
        let post = sqlx::query_as::<_, Post>(&format!(
            "SELECT {POST_COLUMNS} FROM posts
             WHERE slug = $1 AND status = 'published'"
        ))
        .bind(slug)
        .fetch_optional(self.pool)
        .await?;

        Ok(post)
    }

    /// Every post regardless of status, newest first (admin listing).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Post>, RepositoryError> {
        let posts = sqlx::query_as::<_, Post>(&format!(
            "SELECT {POST_COLUMNS} FROM posts ORDER BY created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(posts)
    }

    /// A post by id regardless of status (admin detail).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: PostId) -> Result<Option<Post>, RepositoryError> {
        let post = sqlx::query_as::<_, Post>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(post)
    }

    /// Create a post. A post created directly as `published` gets its
    /// `published_at` stamped now.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the slug already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, input: &PostInput) -> Result<Post, RepositoryError> {
        let published_at = input
            .published_at
            .or_else(|| (input.status == PublishStatus::Published).then(Utc::now));

        let post = sqlx::query_as::<_, Post>(&format!(
            "INSERT INTO posts (slug, title, excerpt, body, tags, status, published_at, scheduled_for)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {POST_COLUMNS}"
        ))
        .bind(&input.slug)
        .bind(&input.title)
        .bind(&input.excerpt)
        .bind(&input.body)
        .bind(&input.tags)
        .bind(input.status)
        .bind(published_at)
        .bind(input.scheduled_for)
        .fetch_one(self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "post slug"))?;

        Ok(post)
    }

    /// Update a post. Moving into `published` stamps `published_at` once;
    /// moving out of it leaves the original timestamp.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no post has that id.
    /// Returns `RepositoryError::Conflict` if the new slug collides.
    pub async fn update(&self, id: PostId, input: &PostInput) -> Result<Post, RepositoryError> {
        let post = sqlx::query_as::<_, Post>(&format!(
            "UPDATE posts
             SET slug = $2, title = $3, excerpt = $4, body = $5, tags = $6,
                 status = $7,
                 published_at = CASE WHEN $7 = 'published'
                                     THEN COALESCE(published_at, now())
                                     ELSE published_at END,
                 scheduled_for = $8,
                 updated_at = now()
             WHERE id = $1
             RETURNING {POST_COLUMNS}"
        ))
        .bind(id)
        .bind(&input.slug)
        .bind(&input.title)
        .bind(&input.excerpt)
        .bind(&input.body)
        .bind(&input.tags)
        .bind(input.status)
        .bind(input.scheduled_for)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "post slug"))?;

        post.ok_or(RepositoryError::NotFound)
    }

    /// Delete a post. Returns `true` if it existed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: PostId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Remove every post (content import replaces the table wholesale).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete_all(&self) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM posts").execute(self.pool).await?;
        Ok(())
    }

    /// Promote every scheduled post whose time has come. Returns how many
    /// were published.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn publish_due(&self, now: DateTime<Utc>) -> Result<u64, RepositoryError> {
        let result = sqlx::query(
            "UPDATE posts
             SET status = 'published', published_at = $1, updated_at = now()
             WHERE status = 'scheduled' AND scheduled_for <= $1",
        )
        .bind(now)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Post counts by status for the dashboard: (total, published, draft, scheduled).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn counts(&self) -> Result<(i64, i64, i64, i64), RepositoryError> {
        let row: (i64, i64, i64, i64) = sqlx::query_as(
            "SELECT count(*),
                    count(*) FILTER (WHERE status = 'published'),
                    count(*) FILTER (WHERE status = 'draft'),
                    count(*) FILTER (WHERE status = 'scheduled')
             FROM posts",
        )
        .fetch_one(self.pool)
        .await?;

        Ok(row)
    }
}
