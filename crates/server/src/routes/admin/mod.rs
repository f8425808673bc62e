//! Admin panel routes.
//!
//! Every handler here except login takes the `RequireAdmin` extractor;
//! unauthenticated requests never reach handler bodies.

pub mod auth;
pub mod case_studies;
pub mod dashboard;
pub mod export;
pub mod media;
pub mod posts;
pub mod profile;
pub mod projects;
pub mod settings;

use axum::{Router, routing::get};
use serde::Serialize;

use crate::db::RepositoryError;
use crate::error::AppError;
use crate::state::AppState;

/// Build the admin router.
#[must_use]
pub fn router(state: &AppState) -> Router<AppState> {
    Router::new()
        .merge(auth::router(state))
        .nest("/posts", posts::router())
        .nest("/projects", projects::router())
        .nest("/case-studies", case_studies::router())
        .merge(profile::router())
        .nest("/media", media::router())
        .route("/dashboard", get(dashboard::summary))
        .merge(export::router())
        .merge(settings::router())
}

/// Body for delete/import-style operations that have no entity to return.
#[derive(Debug, Serialize)]
pub struct OperationResponse {
    pub success: bool,
    pub message: String,
}

impl OperationResponse {
    pub(crate) fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// Validate a URL slug: lowercase ASCII, digits, and hyphens, no leading or
/// trailing hyphen, at most 120 characters.
pub(crate) fn validate_slug(slug: &str) -> Result<(), AppError> {
    if slug.is_empty() {
        return Err(AppError::BadRequest("Slug must not be empty".to_string()));
    }
    if slug.len() > 120 {
        return Err(AppError::BadRequest(
            "Slug must be at most 120 characters".to_string(),
        ));
    }
    if !slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(AppError::BadRequest(
            "Slug may only contain lowercase letters, digits, and hyphens".to_string(),
        ));
    }
    if slug.starts_with('-') || slug.ends_with('-') {
        return Err(AppError::BadRequest(
            "Slug must not start or end with a hyphen".to_string(),
        ));
    }
    Ok(())
}

/// Validate that a required text field is non-empty.
pub(crate) fn require_field(value: &str, field: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::BadRequest(format!("{field} must not be empty")));
    }
    Ok(())
}

/// Map repository errors for a known entity: `NotFound` becomes a 404 for
/// `what`, `Conflict` a 400 with the conflict message.
pub(crate) fn map_repo(e: RepositoryError, what: &str) -> AppError {
    match e {
        RepositoryError::NotFound => AppError::NotFound(what.to_string()),
        RepositoryError::Conflict(msg) => AppError::BadRequest(msg),
        other => AppError::Database(other),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_slug_accepts_typical_slugs() {
        assert!(validate_slug("hello-world").is_ok());
        assert!(validate_slug("post-2").is_ok());
        assert!(validate_slug("a").is_ok());
    }

    #[test]
    fn test_validate_slug_rejects_bad_input() {
        assert!(validate_slug("").is_err());
        assert!(validate_slug("Hello-World").is_err());
        assert!(validate_slug("hello world").is_err());
        assert!(validate_slug("hello_world").is_err());
        assert!(validate_slug("-leading").is_err());
        assert!(validate_slug("trailing-").is_err());
        assert!(validate_slug(&"a".repeat(121)).is_err());
    }

    #[test]
    fn test_require_field() {
        assert!(require_field("title", "Title").is_ok());
        assert!(require_field("", "Title").is_err());
        assert!(require_field("   ", "Title").is_err());
    }
}
