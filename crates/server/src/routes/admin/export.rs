//! Content export and import.
//!
//! Export produces a single JSON bundle of everything the admin panel
//! edits. Import consumes a bundle and replaces the content tables
//! wholesale; it is table-by-table rather than one atomic transaction, so
//! treat it as a restore tool, not a sync mechanism. Media files are not
//! part of the bundle - only the datastore content is.

use std::collections::HashMap;

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::OperationResponse;
use crate::db::case_studies::{CaseStudyInput, CaseStudyRepository};
use crate::db::posts::{PostInput, PostRepository};
use crate::db::profile::{ExperienceInput, ProfileRepository, SkillInput};
use crate::db::projects::{ProjectInput, ProjectRepository};
use crate::db::settings::SettingsRepository;
use crate::error::Result;
use crate::middleware::RequireAdmin;
use crate::models::{CaseStudy, ExperienceEntry, Post, Project, Skill};
use crate::state::AppState;

/// The full-content bundle produced by export and consumed by import.
#[derive(Debug, Serialize, Deserialize)]
pub struct ContentBundle {
    pub exported_at: DateTime<Utc>,
    pub settings: HashMap<String, String>,
    pub posts: Vec<Post>,
    pub projects: Vec<Project>,
    pub case_studies: Vec<CaseStudy>,
    pub skills: Vec<Skill>,
    pub experience: Vec<ExperienceEntry>,
}

/// Build the export/import router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/export", get(export))
        .route("/import", post(import))
}

/// Export all content as a JSON bundle.
///
/// GET /api/admin/export
#[instrument(skip(state))]
async fn export(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<ContentBundle>> {
    let pool = state.pool();

    let bundle = ContentBundle {
        exported_at: Utc::now(),
        settings: SettingsRepository::new(pool).get_all().await?,
        posts: PostRepository::new(pool).list_all().await?,
        projects: ProjectRepository::new(pool).list_all().await?,
        case_studies: CaseStudyRepository::new(pool).list_all().await?,
        skills: ProfileRepository::new(pool).list_skills().await?,
        experience: ProfileRepository::new(pool).list_experience().await?,
    };

    Ok(Json(bundle))
}

/// Replace all content from a bundle. Entity ids are regenerated; posts
/// keep their original publication timestamps.
///
/// POST /api/admin/import
#[instrument(skip(state, bundle))]
async fn import(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(bundle): Json<ContentBundle>,
) -> Result<Json<OperationResponse>> {
    let pool = state.pool();

    let posts = PostRepository::new(pool);
    posts.delete_all().await?;
    for post in &bundle.posts {
        posts
            .create(&PostInput {
                slug: post.slug.clone(),
                title: post.title.clone(),
                excerpt: post.excerpt.clone(),
                body: post.body.clone(),
                tags: post.tags.clone(),
                status: post.status,
                scheduled_for: post.scheduled_for,
                published_at: post.published_at,
            })
            .await?;
    }

    let projects = ProjectRepository::new(pool);
    projects.delete_all().await?;
    for project in &bundle.projects {
        projects
            .create(&ProjectInput {
                slug: project.slug.clone(),
                title: project.title.clone(),
                summary: project.summary.clone(),
                body: project.body.clone(),
                tech_stack: project.tech_stack.clone(),
                repo_url: project.repo_url.clone(),
                live_url: project.live_url.clone(),
                featured: project.featured,
                sort_order: project.sort_order,
                status: project.status,
            })
            .await?;
    }

    let case_studies = CaseStudyRepository::new(pool);
    case_studies.delete_all().await?;
    for study in &bundle.case_studies {
        case_studies
            .create(&CaseStudyInput {
                slug: study.slug.clone(),
                title: study.title.clone(),
                client: study.client.clone(),
                summary: study.summary.clone(),
                body: study.body.clone(),
                outcome: study.outcome.clone(),
                status: study.status,
            })
            .await?;
    }

    let profile = ProfileRepository::new(pool);
    profile.delete_all_skills().await?;
    for skill in &bundle.skills {
        profile
            .create_skill(&SkillInput {
                name: skill.name.clone(),
                category: skill.category.clone(),
                proficiency: skill.proficiency,
                sort_order: skill.sort_order,
            })
            .await?;
    }
    profile.delete_all_experience().await?;
    for entry in &bundle.experience {
        profile
            .create_experience(&ExperienceInput {
                company: entry.company.clone(),
                title: entry.title.clone(),
                summary: entry.summary.clone(),
                started_on: entry.started_on,
                ended_on: entry.ended_on,
                sort_order: entry.sort_order,
            })
            .await?;
    }

    SettingsRepository::new(pool).upsert_many(&bundle.settings).await?;
    state.invalidate_settings_cache().await;

    tracing::info!(
        posts = bundle.posts.len(),
        projects = bundle.projects.len(),
        case_studies = bundle.case_studies.len(),
        "content imported"
    );

    Ok(Json(OperationResponse::ok("Content imported")))
}
