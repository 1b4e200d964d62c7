//! Route definitions for user accounts and tokens.

use axum::routing::{post, put};
use axum::Router;

use crate::handlers::{tokens, users};
use crate::state::AppState;

/// ```text
/// POST   /users                     -> register
/// PUT    /users/activated           -> activate
/// POST   /tokens/authentication     -> create_authentication_token
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", post(users::register))
        .route("/users/activated", put(users::activate))
        .route(
            "/tokens/authentication",
            post(tokens::create_authentication_token),
        )
}
