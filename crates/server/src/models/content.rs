//! Content models: posts, projects, case studies, profile data, media.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use folio_core::{
    CaseStudyId, ExperienceId, MediaId, PostId, ProjectId, PublishStatus, SkillId,
};

/// A blog post.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
    pub id: PostId,
    pub slug: String,
    pub title: String,
    pub excerpt: Option<String>,
    /// Markdown body, stored and served raw.
    pub body: String,
    pub tags: Vec<String>,
    pub status: PublishStatus,
    pub published_at: Option<DateTime<Utc>>,
    /// When a `Scheduled` post should go live.
    pub scheduled_for: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A portfolio project.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Project {
    pub id: ProjectId,
    pub slug: String,
    pub title: String,
    pub summary: String,
    pub body: String,
    pub tech_stack: Vec<String>,
    pub repo_url: Option<String>,
    pub live_url: Option<String>,
    pub featured: bool,
    pub sort_order: i32,
    pub status: PublishStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A client case study.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CaseStudy {
    pub id: CaseStudyId,
    pub slug: String,
    pub title: String,
    pub client: Option<String>,
    pub summary: String,
    pub body: String,
    pub outcome: Option<String>,
    pub status: PublishStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A skill entry shown on the public site.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Skill {
    pub id: SkillId,
    pub name: String,
    pub category: String,
    /// 0-100 self-assessed proficiency.
    pub proficiency: i16,
    pub sort_order: i32,
}

/// A work-experience entry.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ExperienceEntry {
    pub id: ExperienceId,
    pub company: String,
    pub title: String,
    pub summary: String,
    pub started_on: NaiveDate,
    /// `None` means the position is current.
    pub ended_on: Option<NaiveDate>,
    pub sort_order: i32,
}

/// Metadata for an uploaded media file.
///
/// The bytes themselves live on the file system under the configured upload
/// directory; `file_name` is the on-disk name, `original_name` what the
/// uploader called it.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct MediaItem {
    pub id: MediaId,
    pub file_name: String,
    pub original_name: String,
    pub content_type: String,
    pub byte_size: i64,
    pub uploaded_at: DateTime<Utc>,
}

impl MediaItem {
    /// Public URL path the file is served from.
    #[must_use]
    pub fn public_path(&self) -> String {
        format!("/uploads/{}", self.file_name)
    }
}

/// A site-wide setting (key/value).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Setting {
    pub key: String,
    pub value: String,
    pub updated_at: DateTime<Utc>,
}
