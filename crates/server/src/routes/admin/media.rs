//! Admin media uploads.
//!
//! Files are written to the configured upload directory under a generated
//! name and served publicly from `/uploads/*`; only the metadata row lives
//! in the database.

use axum::{
    Json, Router,
    extract::{Multipart, Path, State},
    http::StatusCode,
    routing::get,
};
use tracing::instrument;
use uuid::Uuid;

use folio_core::MediaId;

use super::OperationResponse;
use crate::db::media::MediaRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::models::MediaItem;
use crate::state::AppState;

/// Upload size cap.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Accepted content types and the extension files get on disk.
const ALLOWED_TYPES: &[(&str, &str)] = &[
    ("image/png", "png"),
    ("image/jpeg", "jpg"),
    ("image/gif", "gif"),
    ("image/webp", "webp"),
    ("image/svg+xml", "svg"),
    ("application/pdf", "pdf"),
];

/// Build the admin media router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index).post(upload))
        .route("/{id}", axum::routing::delete(destroy))
}

/// All uploaded media, newest first.
///
/// GET /api/admin/media
#[instrument(skip(state))]
async fn index(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<Vec<MediaItem>>> {
    let items = MediaRepository::new(state.pool()).list().await?;
    Ok(Json(items))
}

/// Upload a file (multipart field `file`).
///
/// POST /api/admin/media
#[instrument(skip(state, multipart))]
async fn upload(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<MediaItem>)> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| AppError::BadRequest("Malformed multipart body".to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let original_name = field
            .file_name()
            .unwrap_or("upload")
            .to_string();
        let content_type = field
            .content_type()
            .map(str::to_owned)
            .ok_or_else(|| AppError::BadRequest("Missing content type".to_string()))?;
        let extension = extension_for(&content_type).ok_or_else(|| {
            AppError::BadRequest(format!("Unsupported file type: {content_type}"))
        })?;

        let data = field
            .bytes()
            .await
            .map_err(|_| AppError::BadRequest("Failed to read upload body".to_string()))?;
        if data.is_empty() {
            return Err(AppError::BadRequest("Uploaded file is empty".to_string()));
        }
        if data.len() > MAX_UPLOAD_BYTES {
            return Err(AppError::BadRequest(format!(
                "Uploaded file exceeds {MAX_UPLOAD_BYTES} bytes"
            )));
        }

        let file_name = format!("{}.{extension}", Uuid::new_v4());
        let upload_dir = state.config().upload_dir.clone();
        let path = upload_dir.join(&file_name);

        tokio::fs::create_dir_all(&upload_dir)
            .await
            .map_err(|e| AppError::Internal(format!("creating upload dir: {e}")))?;
        tokio::fs::write(&path, &data)
            .await
            .map_err(|e| AppError::Internal(format!("writing upload: {e}")))?;

        let byte_size = i64::try_from(data.len())
            .map_err(|_| AppError::BadRequest("Uploaded file is too large".to_string()))?;
        let item = MediaRepository::new(state.pool())
            .create(&file_name, &original_name, &content_type, byte_size)
            .await?;

        tracing::info!(file = %file_name, bytes = byte_size, "media uploaded");
        return Ok((StatusCode::CREATED, Json(item)));
    }

    Err(AppError::BadRequest(
        "Missing multipart field 'file'".to_string(),
    ))
}

/// Delete an upload: the metadata row first, then the file (best effort).
///
/// DELETE /api/admin/media/{id}
#[instrument(skip(state))]
async fn destroy(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<OperationResponse>> {
    let repo = MediaRepository::new(state.pool());
    let item = repo
        .get_by_id(MediaId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("media {id}")))?;

    repo.delete(item.id).await?;

    let path = state.config().upload_dir.join(&item.file_name);
    if let Err(e) = tokio::fs::remove_file(&path).await
        && e.kind() != std::io::ErrorKind::NotFound
    {
        tracing::warn!(file = %item.file_name, error = %e, "failed to remove media file");
    }

    Ok(Json(OperationResponse::ok("Media deleted")))
}

/// On-disk extension for an accepted content type.
fn extension_for(content_type: &str) -> Option<&'static str> {
    ALLOWED_TYPES
        .iter()
        .find(|(ct, _)| *ct == content_type)
        .map(|(_, ext)| *ext)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_for_accepted_types() {
        assert_eq!(extension_for("image/png"), Some("png"));
        assert_eq!(extension_for("image/jpeg"), Some("jpg"));
        assert_eq!(extension_for("application/pdf"), Some("pdf"));
    }

    #[test]
    fn test_extension_for_rejects_everything_else() {
        assert_eq!(extension_for("text/html"), None);
        assert_eq!(extension_for("application/x-sh"), None);
        assert_eq!(extension_for(""), None);
        // No sniffing: the declared type must match exactly.
        assert_eq!(extension_for("image/png; charset=utf-8"), None);
    }
}
