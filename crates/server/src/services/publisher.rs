//! Scheduled publishing.
//!
//! A background task promotes `scheduled` posts whose time has come to
//! `published`. Single-process and best-effort: each sweep is one UPDATE,
//! so a missed tick is simply caught up on the next one.

use std::time::Duration;

use chrono::Utc;

use crate::db::RepositoryError;
use crate::db::posts::PostRepository;
use crate::state::AppState;

/// How often the publisher looks for due posts.
pub const PUBLISH_INTERVAL: Duration = Duration::from_secs(60);

/// Spawn the background task that publishes due posts.
pub fn spawn(state: AppState) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(PUBLISH_INTERVAL);
        loop {
            ticker.tick().await;
            if let Err(e) = publish_due(&state).await {
                tracing::error!(error = %e, "scheduled publish sweep failed");
            }
        }
    })
}

/// One sweep: promote every scheduled post whose time has passed.
async fn publish_due(state: &AppState) -> Result<(), RepositoryError> {
    let published = PostRepository::new(state.pool())
        .publish_due(Utc::now())
        .await?;

    if published > 0 {
        tracing::info!(count = published, "scheduled posts published");
    }

    Ok(())
}
