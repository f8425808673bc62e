//! Public portfolio routes: projects, case studies, skills, experience,
//! and site settings.

use std::collections::HashMap;

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use tracing::instrument;

use crate::db::case_studies::CaseStudyRepository;
use crate::db::profile::ProfileRepository;
use crate::db::projects::ProjectRepository;
use crate::error::{AppError, Result};
use crate::models::{CaseStudy, ExperienceEntry, Project, Skill};
use crate::state::AppState;

/// List published projects.
///
/// GET /api/projects
#[instrument(skip(state))]
pub async fn list_projects(State(state): State<AppState>) -> Result<Json<Vec<Project>>> {
    let projects = ProjectRepository::new(state.pool()).list_published().await?;
    Ok(Json(projects))
}

/// A single published project by slug.
///
/// GET /api/projects/{slug}
#[instrument(skip(state))]
pub async fn show_project(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Project>> {
    let project = ProjectRepository::new(state.pool())
        .get_published_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("project '{slug}'")))?;

    Ok(Json(project))
}

/// List published case studies.
///
/// GET /api/case-studies
#[instrument(skip(state))]
pub async fn list_case_studies(State(state): State<AppState>) -> Result<Json<Vec<CaseStudy>>> {
    let studies = CaseStudyRepository::new(state.pool())
        .list_published()
        .await?;
    Ok(Json(studies))
}

/// A single published case study by slug.
///
/// GET /api/case-studies/{slug}
#[instrument(skip(state))]
pub async fn show_case_study(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<CaseStudy>> {
    let study = CaseStudyRepository::new(state.pool())
        .get_published_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("case study '{slug}'")))?;

    Ok(Json(study))
}

/// List skills in display order.
///
/// GET /api/skills
#[instrument(skip(state))]
pub async fn list_skills(State(state): State<AppState>) -> Result<Json<Vec<Skill>>> {
    let skills = ProfileRepository::new(state.pool()).list_skills().await?;
    Ok(Json(skills))
}

/// List experience entries.
///
/// GET /api/experience
#[instrument(skip(state))]
pub async fn list_experience(
    State(state): State<AppState>,
) -> Result<Json<Vec<ExperienceEntry>>> {
    let entries = ProfileRepository::new(state.pool()).list_experience().await?;
    Ok(Json(entries))
}

/// Site settings (title, tagline, social links), served from the cache.
///
/// GET /api/settings
#[instrument(skip(state))]
pub async fn site_settings(
    State(state): State<AppState>,
) -> Result<Json<HashMap<String, String>>> {
    let settings = state.site_settings().await?;
    Ok(Json(settings.as_ref().clone()))
}

/// Create the public project routes router.
pub fn projects_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_projects))
        .route("/{slug}", get(show_project))
}

/// Create the public case study routes router.
pub fn case_studies_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_case_studies))
        .route("/{slug}", get(show_case_study))
}
