//! Case study repository.

use sqlx::PgPool;

use folio_core::{CaseStudyId, PublishStatus};

use super::{RepositoryError, map_unique_violation};
use crate::models::CaseStudy;

/// Fields written on create/update.
#[derive(Debug, Clone)]
pub struct CaseStudyInput {
    pub slug: String,
    pub title: String,
    pub client: Option<String>,
    pub summary: String,
    pub body: String,
    pub outcome: Option<String>,
    pub status: PublishStatus,
}

const CASE_STUDY_COLUMNS: &str =
    "id, slug, title, client, summary, body, outcome, status, created_at, updated_at";

/// Repository for case study database operations.
pub struct CaseStudyRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CaseStudyRepository<'a> {
    /// Create a new case study repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Published case studies, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_published(&self) -> Result<Vec<CaseStudy>, RepositoryError> {
        let studies = sqlx::query_as::<_, CaseStudy>(&format!(
            "SELECT {CASE_STUDY_COLUMNS} FROM case_studies
             WHERE status = 'published'
             ORDER BY created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(studies)
    }

    /// A published case study by slug.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_published_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<CaseStudy>, RepositoryError> {
        let study = sqlx::query_as::<_, CaseStudy>(&format!(
            "SELECT {CASE_STUDY_COLUMNS} FROM case_studies
             WHERE slug = $1 AND status = 'published'"
        ))
        .bind(slug)
        .fetch_optional(self.pool)
        .await?;

        Ok(study)
    }

    /// Every case study regardless of status (admin listing).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<CaseStudy>, RepositoryError> {
        let studies = sqlx::query_as::<_, CaseStudy>(&format!(
            "SELECT {CASE_STUDY_COLUMNS} FROM case_studies ORDER BY created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(studies)
    }

    /// A case study by id regardless of status (admin detail).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: CaseStudyId) -> Result<Option<CaseStudy>, RepositoryError> {
        let study = sqlx::query_as::<_, CaseStudy>(&format!(
            "SELECT {CASE_STUDY_COLUMNS} FROM case_studies WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(study)
    }

    /// Create a case study.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the slug already exists.
    pub async fn create(&self, input: &CaseStudyInput) -> Result<CaseStudy, RepositoryError> {
        let study = sqlx::query_as::<_, CaseStudy>(&format!(
            "INSERT INTO case_studies (slug, title, client, summary, body, outcome, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {CASE_STUDY_COLUMNS}"
        ))
        .bind(&input.slug)
        .bind(&input.title)
        .bind(&input.client)
        .bind(&input.summary)
        .bind(&input.body)
        .bind(&input.outcome)
        .bind(input.status)
        .fetch_one(self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "case study slug"))?;

        Ok(study)
    }

    /// Update a case study.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no case study has that id.
    /// Returns `RepositoryError::Conflict` if the new slug collides.
    pub async fn update(
        &self,
        id: CaseStudyId,
        input: &CaseStudyInput,
    ) -> Result<CaseStudy, RepositoryError> {
        let study = sqlx::query_as::<_, CaseStudy>(&format!(
            "UPDATE case_studies
             SET slug = $2, title = $3, client = $4, summary = $5, body = $6,
                 outcome = $7, status = $8, updated_at = now()
             WHERE id = $1
             RETURNING {CASE_STUDY_COLUMNS}"
        ))
        .bind(id)
        .bind(&input.slug)
        .bind(&input.title)
        .bind(&input.client)
        .bind(&input.summary)
        .bind(&input.body)
        .bind(&input.outcome)
        .bind(input.status)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "case study slug"))?;

        study.ok_or(RepositoryError::NotFound)
    }

    /// Delete a case study. Returns `true` if it existed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: CaseStudyId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM case_studies WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Remove every case study (content import replaces the table wholesale).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete_all(&self) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM case_studies")
            .execute(self.pool)
            .await?;
        Ok(())
    }

    /// Total number of case studies.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let (count,): (i64,) = sqlx::query_as("SELECT count(*) FROM case_studies")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }
}
