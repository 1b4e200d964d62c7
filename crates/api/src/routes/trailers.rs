//! Route definitions for the `/trailers` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::trailers;
use crate::state::AppState;

/// ```text
/// GET    /trailers       -> list
/// POST   /trailers       -> create          (activated user)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/trailers", get(trailers::list).post(trailers::create))
}
