//! Admin blog post CRUD.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::instrument;

use folio_core::{PostId, PublishStatus};

use super::{OperationResponse, map_repo, require_field, validate_slug};
use crate::db::posts::{PostInput, PostRepository};
use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::models::Post;
use crate::state::AppState;

/// Create/update request body.
#[derive(Debug, Deserialize)]
pub struct PostPayload {
    pub slug: String,
    pub title: String,
    pub excerpt: Option<String>,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub status: PublishStatus,
    pub scheduled_for: Option<DateTime<Utc>>,
}

impl PostPayload {
    fn into_input(self) -> Result<PostInput> {
        validate_slug(&self.slug)?;
        require_field(&self.title, "Title")?;

        if self.status == PublishStatus::Scheduled && self.scheduled_for.is_none() {
            return Err(AppError::BadRequest(
                "Scheduled posts need a scheduled_for timestamp".to_string(),
            ));
        }

        Ok(PostInput {
            slug: self.slug,
            title: self.title,
            excerpt: self.excerpt,
            body: self.body,
            tags: self.tags,
            status: self.status,
            scheduled_for: self.scheduled_for,
            published_at: None,
        })
    }
}

/// Build the admin post router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index).post(create))
        .route("/{id}", get(show).put(update).delete(destroy))
}

/// All posts regardless of status.
///
/// GET /api/admin/posts
#[instrument(skip(state))]
async fn index(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<Vec<Post>>> {
    let posts = PostRepository::new(state.pool()).list_all().await?;
    Ok(Json(posts))
}

/// Create a post.
///
/// POST /api/admin/posts
#[instrument(skip(state, payload))]
async fn create(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(payload): Json<PostPayload>,
) -> Result<(StatusCode, Json<Post>)> {
    let input = payload.into_input()?;
    let post = PostRepository::new(state.pool())
        .create(&input)
        .await
        .map_err(|e| map_repo(e, "post"))?;

    Ok((StatusCode::CREATED, Json(post)))
}

/// A post by id.
///
/// GET /api/admin/posts/{id}
#[instrument(skip(state))]
async fn show(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Post>> {
    let post = PostRepository::new(state.pool())
        .get_by_id(PostId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("post {id}")))?;

    Ok(Json(post))
}

/// Update a post.
///
/// PUT /api/admin/posts/{id}
#[instrument(skip(state, payload))]
async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<PostPayload>,
) -> Result<Json<Post>> {
    let input = payload.into_input()?;
    let post = PostRepository::new(state.pool())
        .update(PostId::new(id), &input)
        .await
        .map_err(|e| map_repo(e, "post"))?;

    Ok(Json(post))
}

/// Delete a post.
///
/// DELETE /api/admin/posts/{id}
#[instrument(skip(state))]
async fn destroy(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<OperationResponse>> {
    let deleted = PostRepository::new(state.pool())
        .delete(PostId::new(id))
        .await?;

    if !deleted {
        return Err(AppError::NotFound(format!("post {id}")));
    }

    Ok(Json(OperationResponse::ok("Post deleted")))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn payload(status: PublishStatus, scheduled_for: Option<DateTime<Utc>>) -> PostPayload {
        PostPayload {
            slug: "first-post".to_string(),
            title: "First Post".to_string(),
            excerpt: None,
            body: "Hello.".to_string(),
            tags: vec!["rust".to_string()],
            status,
            scheduled_for,
        }
    }

    #[test]
    fn test_valid_payload_converts() {
        let input = payload(PublishStatus::Draft, None).into_input().unwrap();
        assert_eq!(input.slug, "first-post");
        assert_eq!(input.status, PublishStatus::Draft);
        assert!(input.published_at.is_none());
    }

    #[test]
    fn test_scheduled_without_timestamp_is_rejected() {
        assert!(payload(PublishStatus::Scheduled, None).into_input().is_err());
        assert!(
            payload(PublishStatus::Scheduled, Some(Utc::now()))
                .into_input()
                .is_ok()
        );
    }

    #[test]
    fn test_bad_slug_is_rejected() {
        let mut p = payload(PublishStatus::Draft, None);
        p.slug = "Bad Slug!".to_string();
        assert!(p.into_input().is_err());
    }

    #[test]
    fn test_empty_title_is_rejected() {
        let mut p = payload(PublishStatus::Draft, None);
        p.title = "  ".to_string();
        assert!(p.into_input().is_err());
    }
}
