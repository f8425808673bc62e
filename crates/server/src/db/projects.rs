//! Portfolio project repository.

use sqlx::PgPool;

use folio_core::{ProjectId, PublishStatus};

use super::{RepositoryError, map_unique_violation};
use crate::models::Project;

/// Fields written on create/update.
#[derive(Debug, Clone)]
pub struct ProjectInput {
    pub slug: String,
    pub title: String,
    pub summary: String,
    pub body: String,
    pub tech_stack: Vec<String>,
    pub repo_url: Option<String>,
    pub live_url: Option<String>,
    pub featured: bool,
    pub sort_order: i32,
    pub status: PublishStatus,
}

const PROJECT_COLUMNS: &str = "id, slug, title, summary, body, tech_stack, repo_url, \
                               live_url, featured, sort_order, status, created_at, updated_at";

/// Repository for project database operations.
pub struct ProjectRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProjectRepository<'a> {
    /// Create a new project repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Published projects, featured first, then by sort order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_published(&self) -> Result<Vec<Project>, RepositoryError> {
        let projects = sqlx::query_as::<_, Project>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects
             WHERE status = 'published'
             ORDER BY featured DESC, sort_order, created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(projects)
    }

    /// A published project by slug.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_published_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<Project>, RepositoryError> {
        let project = sqlx::query_as::<_, Project>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects
             WHERE slug = $1 AND status = 'published'"
        ))
        .bind(slug)
        .fetch_optional(self.pool)
        .await?;

        Ok(project)
    }

    /// Every project regardless of status (admin listing).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Project>, RepositoryError> {
        let projects = sqlx::query_as::<_, Project>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects ORDER BY sort_order, created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(projects)
    }

    /// A project by id regardless of status (admin detail).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: ProjectId) -> Result<Option<Project>, RepositoryError> {
        let project = sqlx::query_as::<_, Project>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(project)
    }

    /// Create a project.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the slug already exists.
    pub async fn create(&self, input: &ProjectInput) -> Result<Project, RepositoryError> {
        let project = sqlx::query_as::<_, Project>(&format!(
            "INSERT INTO projects
                 (slug, title, summary, body, tech_stack, repo_url, live_url,
                  featured, sort_order, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {PROJECT_COLUMNS}"
        ))
        .bind(&input.slug)
        .bind(&input.title)
        .bind(&input.summary)
        .bind(&input.body)
        .bind(&input.tech_stack)
        .bind(&input.repo_url)
        .bind(&input.live_url)
        .bind(input.featured)
        .bind(input.sort_order)
        .bind(input.status)
        .fetch_one(self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "project slug"))?;

        Ok(project)
    }

    /// Update a project.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no project has that id.
    /// Returns `RepositoryError::Conflict` if the new slug collides.
    pub async fn update(
        &self,
        id: ProjectId,
        input: &ProjectInput,
    ) -> Result<Project, RepositoryError> {
        let project = sqlx::query_as::<_, Project>(&format!(
            "UPDATE projects
             SET slug = $2, title = $3, summary = $4, body = $5, tech_stack = $6,
                 repo_url = $7, live_url = $8, featured = $9, sort_order = $10,
                 status = $11, updated_at = now()
             WHERE id = $1
             RETURNING {PROJECT_COLUMNS}"
        ))
        .bind(id)
        .bind(&input.slug)
        .bind(&input.title)
        .bind(&input.summary)
        .bind(&input.body)
        .bind(&input.tech_stack)
        .bind(&input.repo_url)
        .bind(&input.live_url)
        .bind(input.featured)
        .bind(input.sort_order)
        .bind(input.status)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "project slug"))?;

        project.ok_or(RepositoryError::NotFound)
    }

    /// Delete a project. Returns `true` if it existed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: ProjectId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Remove every project (content import replaces the table wholesale).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete_all(&self) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM projects")
            .execute(self.pool)
            .await?;
        Ok(())
    }

    /// Total number of projects.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let (count,): (i64,) = sqlx::query_as("SELECT count(*) FROM projects")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }
}
