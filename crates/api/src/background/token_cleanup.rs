//! Periodic removal of expired tokens.
//!
//! Expired activation and authentication tokens are never accepted, but
//! nothing else deletes them. This job purges them on a fixed interval.

use std::time::Duration;

use greenlight_db::repositories::TokenRepo;
use greenlight_db::DbPool;
use tokio_util::sync::CancellationToken;

/// How often the cleanup job runs.
pub const CLEANUP_INTERVAL: Duration = Duration::from_secs(3600);

/// Run the cleanup loop until `cancel` is triggered.
pub async fn run(pool: DbPool, cancel: CancellationToken) {
    tracing::info!(
        interval_secs = CLEANUP_INTERVAL.as_secs(),
        "Token cleanup job started"
    );

    let mut interval = tokio::time::interval(CLEANUP_INTERVAL);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Token cleanup job stopping");
                break;
            }
            _ = interval.tick() => {
                match TokenRepo::delete_expired(&pool).await {
                    Ok(0) => tracing::debug!("Token cleanup: nothing to purge"),
                    Ok(deleted) => tracing::info!(deleted, "Token cleanup: purged expired tokens"),
                    Err(e) => tracing::error!(error = %e, "Token cleanup failed"),
                }
            }
        }
    }
}
