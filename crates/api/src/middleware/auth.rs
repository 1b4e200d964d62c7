//! Bearer-token authentication extractors for axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use greenlight_core::error::CoreError;
use greenlight_core::user::{validate_token_plaintext, TokenScope};
use greenlight_core::validator::Validator;
use greenlight_db::models::user::User;
use greenlight_db::repositories::UserRepo;

use crate::auth::token::hash_token;
use crate::error::AppError;
use crate::state::AppState;

/// User resolved from an `Authorization: Bearer <token>` header.
///
/// A missing header is rejected as "authentication required"; a malformed,
/// unknown or expired token as an invalid token (401 with a
/// `WWW-Authenticate: Bearer` challenge).
///
/// ```ignore
/// async fn my_handler(AuthUser { user }: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user: User,
}

/// Extract the token from an `Authorization` header value.
///
/// Returns `None` if the scheme is not `Bearer` or the token has the wrong shape.
fn bearer_token(header: &str) -> Option<&str> {
    let token = header.strip_prefix("Bearer ")?;
    let mut v = Validator::new();
    validate_token_plaintext(&mut v, token);
    v.valid().then_some(token)
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or(CoreError::AuthenticationRequired)?;

        let token = header
            .to_str()
            .ok()
            .and_then(bearer_token)
            .ok_or(CoreError::InvalidAuthenticationToken)?;

        let user =
            UserRepo::get_for_token(&state.pool, TokenScope::Authentication, &hash_token(token))
                .await?
                .ok_or(CoreError::InvalidAuthenticationToken)?;

        Ok(AuthUser { user })
    }
}

/// Requires an authenticated user whose account is activated.
/// Rejects with 403 otherwise.
///
/// ```ignore
/// async fn create(RequireActivated(auth): RequireActivated) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RequireActivated(pub AuthUser);

impl FromRequestParts<AppState> for RequireActivated {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth = AuthUser::from_request_parts(parts, state).await?;
        if !auth.user.activated {
            return Err(CoreError::InactiveAccount.into());
        }
        Ok(RequireActivated(auth))
    }
}
