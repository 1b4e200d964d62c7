pub mod actors;
pub mod health;
pub mod movies;
pub mod trailers;
pub mod users;

use axum::Router;

use crate::handlers::fallback;
use crate::state::AppState;

/// Build the `/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /healthcheck                      service status (public)
///
/// /movies                           list (public), create
/// /movies/{id}                      show (public), update, delete
///
/// /actors                           create
/// /actors/{id}                      show (public)
///
/// /trailers                         list (public), create
///
/// /users                            register (public)
/// /users/activated                  activate (public)
/// /tokens/authentication            issue bearer token (public)
/// ```
///
/// Routes not marked public require an activated user. A known path hit
/// with an unsupported method answers 405 with a JSON body.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(movies::router())
        .merge(actors::router())
        .merge(trailers::router())
        .merge(users::router())
        .method_not_allowed_fallback(fallback::method_not_allowed)
}
