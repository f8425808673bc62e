//! Route handlers.
//!
//! Public JSON endpoints under `/api/*`, admin endpoints under
//! `/api/admin/*`. Everything admin except login is behind the
//! `RequireAdmin` gate.

pub mod admin;
pub mod portfolio;
pub mod posts;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Build the application router.
#[must_use]
pub fn routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .nest("/api/posts", posts::router())
        .nest("/api/projects", portfolio::projects_router())
        .nest("/api/case-studies", portfolio::case_studies_router())
        .route("/api/skills", get(portfolio::list_skills))
        .route("/api/experience", get(portfolio::list_experience))
        .route("/api/settings", get(portfolio::site_settings))
        .nest("/api/admin", admin::router(state))
}
