//! Profile data repository: skills and experience entries.
//!
//! Small fixed lists edited wholesale from the admin panel, so updates
//! here are replace-style rather than per-field patches.

use chrono::NaiveDate;
use sqlx::PgPool;

use folio_core::{ExperienceId, SkillId};

use super::RepositoryError;
use crate::models::{ExperienceEntry, Skill};

/// Fields written on skill create/update.
#[derive(Debug, Clone)]
pub struct SkillInput {
    pub name: String,
    pub category: String,
    pub proficiency: i16,
    pub sort_order: i32,
}

/// Fields written on experience create/update.
#[derive(Debug, Clone)]
pub struct ExperienceInput {
    pub company: String,
    pub title: String,
    pub summary: String,
    pub started_on: NaiveDate,
    pub ended_on: Option<NaiveDate>,
    pub sort_order: i32,
}

/// Repository for skills and experience entries.
pub struct ProfileRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProfileRepository<'a> {
    /// Create a new profile repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    // Skills
    // =========================================================================

    /// All skills in display order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_skills(&self) -> Result<Vec<Skill>, RepositoryError> {
        let skills = sqlx::query_as::<_, Skill>(
            "SELECT id, name, category, proficiency, sort_order
             FROM skills
             ORDER BY sort_order, name",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(skills)
    }

    /// Create a skill.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn create_skill(&self, input: &SkillInput) -> Result<Skill, RepositoryError> {
        let skill = sqlx::query_as::<_, Skill>(
            "INSERT INTO skills (name, category, proficiency, sort_order)
             VALUES ($1, $2, $3, $4)
             RETURNING id, name, category, proficiency, sort_order",
        )
        .bind(&input.name)
        .bind(&input.category)
        .bind(input.proficiency)
        .bind(input.sort_order)
        .fetch_one(self.pool)
        .await?;

        Ok(skill)
    }

    /// Update a skill.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no skill has that id.
    pub async fn update_skill(
        &self,
        id: SkillId,
        input: &SkillInput,
    ) -> Result<Skill, RepositoryError> {
        let skill = sqlx::query_as::<_, Skill>(
            "UPDATE skills
             SET name = $2, category = $3, proficiency = $4, sort_order = $5
             WHERE id = $1
             RETURNING id, name, category, proficiency, sort_order",
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.category)
        .bind(input.proficiency)
        .bind(input.sort_order)
        .fetch_optional(self.pool)
        .await?;

        skill.ok_or(RepositoryError::NotFound)
    }

    /// Delete a skill. Returns `true` if it existed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete_skill(&self, id: SkillId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM skills WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Remove every skill (content import replaces the table wholesale).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete_all_skills(&self) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM skills").execute(self.pool).await?;
        Ok(())
    }

    // =========================================================================
    // Experience
    // =========================================================================

    /// All experience entries, current first, then by start date descending.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_experience(&self) -> Result<Vec<ExperienceEntry>, RepositoryError> {
        let entries = sqlx::query_as::<_, ExperienceEntry>(
            "SELECT id, company, title, summary, started_on, ended_on, sort_order
             FROM experience_entries
             ORDER BY sort_order, ended_on IS NOT NULL, started_on DESC",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(entries)
    }

    /// Create an experience entry.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn create_experience(
        &self,
        input: &ExperienceInput,
    ) -> Result<ExperienceEntry, RepositoryError> {
        let entry = sqlx::query_as::<_, ExperienceEntry>(
            "INSERT INTO experience_entries (company, title, summary, started_on, ended_on, sort_order)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING id, company, title, summary, started_on, ended_on, sort_order",
        )
        .bind(&input.company)
        .bind(&input.title)
        .bind(&input.summary)
        .bind(input.started_on)
        .bind(input.ended_on)
        .bind(input.sort_order)
        .fetch_one(self.pool)
        .await?;

        Ok(entry)
    }

    /// Update an experience entry.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no entry has that id.
    pub async fn update_experience(
        &self,
        id: ExperienceId,
        input: &ExperienceInput,
    ) -> Result<ExperienceEntry, RepositoryError> {
        let entry = sqlx::query_as::<_, ExperienceEntry>(
            "UPDATE experience_entries
             SET company = $2, title = $3, summary = $4, started_on = $5,
                 ended_on = $6, sort_order = $7
             WHERE id = $1
             RETURNING id, company, title, summary, started_on, ended_on, sort_order",
        )
        .bind(id)
        .bind(&input.company)
        .bind(&input.title)
        .bind(&input.summary)
        .bind(input.started_on)
        .bind(input.ended_on)
        .bind(input.sort_order)
        .fetch_optional(self.pool)
        .await?;

        entry.ok_or(RepositoryError::NotFound)
    }

    /// Remove every experience entry (content import replaces the table wholesale).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete_all_experience(&self) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM experience_entries")
            .execute(self.pool)
            .await?;
        Ok(())
    }

    /// Delete an experience entry. Returns `true` if it existed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete_experience(&self, id: ExperienceId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM experience_entries WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
