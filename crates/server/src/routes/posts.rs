//! Public blog post routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use tracing::instrument;

use crate::db::posts::PostRepository;
use crate::error::{AppError, Result};
use crate::models::Post;
use crate::state::AppState;

/// List published posts, newest first.
///
/// GET /api/posts
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Post>>> {
    let posts = PostRepository::new(state.pool()).list_published().await?;
    Ok(Json(posts))
}

/// A single published post by slug.
///
/// GET /api/posts/{slug}
///
/// # Errors
///
/// Returns 404 if the post doesn't exist or isn't published - drafts and
/// scheduled posts are indistinguishable from missing ones.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Post>> {
    let post = PostRepository::new(state.pool())
        .get_published_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("post '{slug}'")))?;

    Ok(Json(post))
}

/// Create the public post routes router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/{slug}", get(show))
}
