//! Route definitions for the `/movies` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::movies;
use crate::state::AppState;

/// ```text
/// GET    /movies         -> list
/// POST   /movies         -> create          (activated user)
/// GET    /movies/{id}    -> show
/// PATCH  /movies/{id}    -> update          (activated user)
/// DELETE /movies/{id}    -> delete          (activated user)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/movies", get(movies::list).post(movies::create))
        .route(
            "/movies/{id}",
            get(movies::show)
                .patch(movies::update)
                .delete(movies::delete),
        )
}
