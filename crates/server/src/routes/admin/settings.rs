//! Admin site-settings editing.

use std::collections::HashMap;

use axum::{
    Json, Router,
    extract::State,
    routing::get,
};
use tracing::instrument;

use super::OperationResponse;
use crate::db::settings::SettingsRepository;
use crate::error::Result;
use crate::middleware::RequireAdmin;
use crate::state::AppState;

/// Build the admin settings router.
pub fn router() -> Router<AppState> {
    Router::new().route("/settings", get(index).put(update))
}

/// Current settings straight from the datastore (no cache on the admin
/// side - the editor should always see what is stored).
///
/// GET /api/admin/settings
#[instrument(skip(state))]
async fn index(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<HashMap<String, String>>> {
    let settings = SettingsRepository::new(state.pool()).get_all().await?;
    Ok(Json(settings))
}

/// Upsert settings and drop the public cache.
///
/// PUT /api/admin/settings
#[instrument(skip(state, values))]
async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(values): Json<HashMap<String, String>>,
) -> Result<Json<OperationResponse>> {
    SettingsRepository::new(state.pool())
        .upsert_many(&values)
        .await?;
    state.invalidate_settings_cache().await;

    Ok(Json(OperationResponse::ok("Settings saved")))
}
