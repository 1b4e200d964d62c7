use std::sync::Arc;

use tokio_util::task::TaskTracker;

use crate::config::ServerConfig;
use crate::mailer::Mailer;

/// Shared application state available to all axum handlers via `State<AppState>`.
///
/// Cheap to clone: the pool and tracker are reference-counted handles.
#[derive(Clone)]
pub struct AppState {
    pub pool: greenlight_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// `None` when SMTP is not configured.
    pub mailer: Option<Arc<Mailer>>,
    /// Tracks fire-and-forget work so shutdown can wait for it.
    pub background: TaskTracker,
}
