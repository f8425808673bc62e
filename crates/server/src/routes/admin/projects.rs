//! Admin project CRUD.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use serde::Deserialize;
use tracing::instrument;

use folio_core::{ProjectId, PublishStatus};

use super::{OperationResponse, map_repo, require_field, validate_slug};
use crate::db::projects::{ProjectInput, ProjectRepository};
use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::models::Project;
use crate::state::AppState;

/// Create/update request body.
#[derive(Debug, Deserialize)]
pub struct ProjectPayload {
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    pub repo_url: Option<String>,
    pub live_url: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default)]
    pub status: PublishStatus,
}

impl ProjectPayload {
    fn into_input(self) -> Result<ProjectInput> {
        validate_slug(&self.slug)?;
        require_field(&self.title, "Title")?;

        Ok(ProjectInput {
            slug: self.slug,
            title: self.title,
            summary: self.summary,
            body: self.body,
            tech_stack: self.tech_stack,
            repo_url: self.repo_url,
            live_url: self.live_url,
            featured: self.featured,
            sort_order: self.sort_order,
            status: self.status,
        })
    }
}

/// Build the admin project router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index).post(create))
        .route("/{id}", get(show).put(update).delete(destroy))
}

/// All projects regardless of status.
///
/// GET /api/admin/projects
#[instrument(skip(state))]
async fn index(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<Vec<Project>>> {
    let projects = ProjectRepository::new(state.pool()).list_all().await?;
    Ok(Json(projects))
}

/// Create a project.
///
/// POST /api/admin/projects
#[instrument(skip(state, payload))]
async fn create(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(payload): Json<ProjectPayload>,
) -> Result<(StatusCode, Json<Project>)> {
    let input = payload.into_input()?;
    let project = ProjectRepository::new(state.pool())
        .create(&input)
        .await
        .map_err(|e| map_repo(e, "project"))?;

    Ok((StatusCode::CREATED, Json(project)))
}

/// A project by id.
///
/// GET /api/admin/projects/{id}
#[instrument(skip(state))]
async fn show(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Project>> {
    let project = ProjectRepository::new(state.pool())
        .get_by_id(ProjectId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("project {id}")))?;

    Ok(Json(project))
}

/// Update a project.
///
/// PUT /api/admin/projects/{id}
#[instrument(skip(state, payload))]
async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<ProjectPayload>,
) -> Result<Json<Project>> {
    let input = payload.into_input()?;
    let project = ProjectRepository::new(state.pool())
        .update(ProjectId::new(id), &input)
        .await
        .map_err(|e| map_repo(e, "project"))?;

    Ok(Json(project))
}

/// Delete a project.
///
/// DELETE /api/admin/projects/{id}
#[instrument(skip(state))]
async fn destroy(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<OperationResponse>> {
    let deleted = ProjectRepository::new(state.pool())
        .delete(ProjectId::new(id))
        .await?;

    if !deleted {
        return Err(AppError::NotFound(format!("project {id}")));
    }

    Ok(Json(OperationResponse::ok("Project deleted")))
}
