//! Admin dashboard: content counts and recent activity.

use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::instrument;

use folio_core::{PostId, PublishStatus};

use crate::db::case_studies::CaseStudyRepository;
use crate::db::media::MediaRepository;
use crate::db::posts::PostRepository;
use crate::db::projects::ProjectRepository;
use crate::error::Result;
use crate::middleware::RequireAdmin;
use crate::state::AppState;

/// How many recently-touched posts the dashboard shows.
const RECENT_POSTS_COUNT: usize = 5;

/// Post counts by status.
#[derive(Debug, Serialize)]
pub struct PostCounts {
    pub total: i64,
    pub published: i64,
    pub drafts: i64,
    pub scheduled: i64,
}

/// A recently-touched post.
#[derive(Debug, Serialize)]
pub struct RecentPost {
    pub id: PostId,
    pub slug: String,
    pub title: String,
    pub status: PublishStatus,
    pub updated_at: DateTime<Utc>,
}

/// Dashboard summary payload.
#[derive(Debug, Serialize)]
pub struct DashboardSummary {
    pub posts: PostCounts,
    pub projects: i64,
    pub case_studies: i64,
    pub media_items: i64,
    pub recent_posts: Vec<RecentPost>,
}

/// Content counts and recent activity.
///
/// GET /api/admin/dashboard
#[instrument(skip(state))]
pub async fn summary(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<DashboardSummary>> {
    let pool = state.pool();

    let (total, published, drafts, scheduled) = PostRepository::new(pool).counts().await?;
    let projects = ProjectRepository::new(pool).count().await?;
    let case_studies = CaseStudyRepository::new(pool).count().await?;
    let media_items = MediaRepository::new(pool).count().await?;

    let recent_posts = PostRepository::new(pool)
        .list_all()
        .await?
        .into_iter()
        .take(RECENT_POSTS_COUNT)
        .map(|p| RecentPost {
            id: p.id,
            slug: p.slug,
            title: p.title,
            status: p.status,
            updated_at: p.updated_at,
        })
        .collect();

    Ok(Json(DashboardSummary {
        posts: PostCounts {
            total,
            published,
            drafts,
            scheduled,
        },
        projects,
        case_studies,
        media_items,
        recent_posts,
    }))
}
