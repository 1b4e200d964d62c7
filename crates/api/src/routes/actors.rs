//! Route definitions for the `/actors` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::actors;
use crate::state::AppState;

/// ```text
/// POST   /actors         -> create          (activated user)
/// GET    /actors/{id}    -> show
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/actors", post(actors::create))
        .route("/actors/{id}", get(actors::show))
}
