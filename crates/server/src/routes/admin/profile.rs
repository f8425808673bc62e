//! Admin CRUD for profile data: skills and experience entries.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::instrument;

use folio_core::{ExperienceId, SkillId};

use super::{OperationResponse, map_repo, require_field};
use crate::db::profile::{ExperienceInput, ProfileRepository, SkillInput};
use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::models::{ExperienceEntry, Skill};
use crate::state::AppState;

/// Skill create/update request body.
#[derive(Debug, Deserialize)]
pub struct SkillPayload {
    pub name: String,
    #[serde(default)]
    pub category: String,
    pub proficiency: i16,
    #[serde(default)]
    pub sort_order: i32,
}

impl SkillPayload {
    fn into_input(self) -> Result<SkillInput> {
        require_field(&self.name, "Name")?;
        if !(0..=100).contains(&self.proficiency) {
            return Err(AppError::BadRequest(
                "Proficiency must be between 0 and 100".to_string(),
            ));
        }

        Ok(SkillInput {
            name: self.name,
            category: self.category,
            proficiency: self.proficiency,
            sort_order: self.sort_order,
        })
    }
}

/// Experience create/update request body.
#[derive(Debug, Deserialize)]
pub struct ExperiencePayload {
    pub company: String,
    pub title: String,
    #[serde(default)]
    pub summary: String,
    pub started_on: NaiveDate,
    pub ended_on: Option<NaiveDate>,
    #[serde(default)]
    pub sort_order: i32,
}

impl ExperiencePayload {
    fn into_input(self) -> Result<ExperienceInput> {
        require_field(&self.company, "Company")?;
        require_field(&self.title, "Title")?;
        if let Some(ended) = self.ended_on
            && ended < self.started_on
        {
            return Err(AppError::BadRequest(
                "End date must not precede start date".to_string(),
            ));
        }

        Ok(ExperienceInput {
            company: self.company,
            title: self.title,
            summary: self.summary,
            started_on: self.started_on,
            ended_on: self.ended_on,
            sort_order: self.sort_order,
        })
    }
}

/// Build the admin profile router (skills + experience).
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/skills", get(list_skills).post(create_skill))
        .route("/skills/{id}", axum::routing::put(update_skill).delete(delete_skill))
        .route("/experience", get(list_experience).post(create_experience))
        .route(
            "/experience/{id}",
            axum::routing::put(update_experience).delete(delete_experience),
        )
}

/// GET /api/admin/skills
#[instrument(skip(state))]
async fn list_skills(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<Vec<Skill>>> {
    let skills = ProfileRepository::new(state.pool()).list_skills().await?;
    Ok(Json(skills))
}

/// POST /api/admin/skills
#[instrument(skip(state, payload))]
async fn create_skill(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(payload): Json<SkillPayload>,
) -> Result<(StatusCode, Json<Skill>)> {
    let input = payload.into_input()?;
    let skill = ProfileRepository::new(state.pool())
        .create_skill(&input)
        .await?;

    Ok((StatusCode::CREATED, Json(skill)))
}

/// PUT /api/admin/skills/{id}
#[instrument(skip(state, payload))]
async fn update_skill(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<SkillPayload>,
) -> Result<Json<Skill>> {
    let input = payload.into_input()?;
    let skill = ProfileRepository::new(state.pool())
        .update_skill(SkillId::new(id), &input)
        .await
        .map_err(|e| map_repo(e, "skill"))?;

    Ok(Json(skill))
}

/// DELETE /api/admin/skills/{id}
#[instrument(skip(state))]
async fn delete_skill(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<OperationResponse>> {
    let deleted = ProfileRepository::new(state.pool())
        .delete_skill(SkillId::new(id))
        .await?;

    if !deleted {
        return Err(AppError::NotFound(format!("skill {id}")));
    }

    Ok(Json(OperationResponse::ok("Skill deleted")))
}

/// GET /api/admin/experience
#[instrument(skip(state))]
async fn list_experience(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<Vec<ExperienceEntry>>> {
    let entries = ProfileRepository::new(state.pool()).list_experience().await?;
    Ok(Json(entries))
}

/// POST /api/admin/experience
#[instrument(skip(state, payload))]
async fn create_experience(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(payload): Json<ExperiencePayload>,
) -> Result<(StatusCode, Json<ExperienceEntry>)> {
    let input = payload.into_input()?;
    let entry = ProfileRepository::new(state.pool())
        .create_experience(&input)
        .await?;

    Ok((StatusCode::CREATED, Json(entry)))
}

/// PUT /api/admin/experience/{id}
#[instrument(skip(state, payload))]
async fn update_experience(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<ExperiencePayload>,
) -> Result<Json<ExperienceEntry>> {
    let input = payload.into_input()?;
    let entry = ProfileRepository::new(state.pool())
        .update_experience(ExperienceId::new(id), &input)
        .await
        .map_err(|e| map_repo(e, "experience entry"))?;

    Ok(Json(entry))
}

/// DELETE /api/admin/experience/{id}
#[instrument(skip(state))]
async fn delete_experience(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<OperationResponse>> {
    let deleted = ProfileRepository::new(state.pool())
        .delete_experience(ExperienceId::new(id))
        .await?;

    if !deleted {
        return Err(AppError::NotFound(format!("experience entry {id}")));
    }

    Ok(Json(OperationResponse::ok("Experience entry deleted")))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_skill_proficiency_bounds() {
        let payload = |proficiency| SkillPayload {
            name: "Rust".to_string(),
            category: "Languages".to_string(),
            proficiency,
            sort_order: 0,
        };

        assert!(payload(0).into_input().is_ok());
        assert!(payload(100).into_input().is_ok());
        assert!(payload(101).into_input().is_err());
        assert!(payload(-1).into_input().is_err());
    }

    #[test]
    fn test_experience_date_ordering() {
        let payload = |ended_on| ExperiencePayload {
            company: "Acme".to_string(),
            title: "Engineer".to_string(),
            summary: String::new(),
            started_on: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            ended_on,
            sort_order: 0,
        };

        assert!(payload(None).into_input().is_ok());
        assert!(
            payload(NaiveDate::from_ymd_opt(2022, 6, 1))
                .into_input()
                .is_ok()
        );
        assert!(
            payload(NaiveDate::from_ymd_opt(2019, 12, 31))
                .into_input()
                .is_err()
        );
    }
}
