//! Admin case study CRUD.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use serde::Deserialize;
use tracing::instrument;

use folio_core::{CaseStudyId, PublishStatus};

use super::{OperationResponse, map_repo, require_field, validate_slug};
use crate::db::case_studies::{CaseStudyInput, CaseStudyRepository};
use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::models::CaseStudy;
use crate::state::AppState;

/// Create/update request body.
#[derive(Debug, Deserialize)]
pub struct CaseStudyPayload {
    pub slug: String,
    pub title: String,
    pub client: Option<String>,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub body: String,
    pub outcome: Option<String>,
    #[serde(default)]
    pub status: PublishStatus,
}

impl CaseStudyPayload {
    fn into_input(self) -> Result<CaseStudyInput> {
        validate_slug(&self.slug)?;
        require_field(&self.title, "Title")?;

        Ok(CaseStudyInput {
            slug: self.slug,
            title: self.title,
            client: self.client,
            summary: self.summary,
            body: self.body,
            outcome: self.outcome,
            status: self.status,
        })
    }
}

/// Build the admin case study router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index).post(create))
        .route("/{id}", get(show).put(update).delete(destroy))
}

/// All case studies regardless of status.
///
/// GET /api/admin/case-studies
#[instrument(skip(state))]
async fn index(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<Vec<CaseStudy>>> {
    let studies = CaseStudyRepository::new(state.pool()).list_all().await?;
    Ok(Json(studies))
}

/// Create a case study.
///
/// POST /api/admin/case-studies
#[instrument(skip(state, payload))]
async fn create(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(payload): Json<CaseStudyPayload>,
) -> Result<(StatusCode, Json<CaseStudy>)> {
    let input = payload.into_input()?;
    let study = CaseStudyRepository::new(state.pool())
        .create(&input)
        .await
        .map_err(|e| map_repo(e, "case study"))?;

    Ok((StatusCode::CREATED, Json(study)))
}

/// A case study by id.
///
/// GET /api/admin/case-studies/{id}
#[instrument(skip(state))]
async fn show(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<CaseStudy>> {
    let study = CaseStudyRepository::new(state.pool())
        .get_by_id(CaseStudyId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("case study {id}")))?;

    Ok(Json(study))
}

/// Update a case study.
///
/// PUT /api/admin/case-studies/{id}
#[instrument(skip(state, payload))]
async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<CaseStudyPayload>,
) -> Result<Json<CaseStudy>> {
    let input = payload.into_input()?;
    let study = CaseStudyRepository::new(state.pool())
        .update(CaseStudyId::new(id), &input)
        .await
        .map_err(|e| map_repo(e, "case study"))?;

    Ok(Json(study))
}

/// Delete a case study.
///
/// DELETE /api/admin/case-studies/{id}
#[instrument(skip(state))]
async fn destroy(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<OperationResponse>> {
    let deleted = CaseStudyRepository::new(state.pool())
        .delete(CaseStudyId::new(id))
        .await?;

    if !deleted {
        return Err(AppError::NotFound(format!("case study {id}")));
    }

    Ok(Json(OperationResponse::ok("Case study deleted")))
}
