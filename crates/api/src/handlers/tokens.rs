//! Handler for issuing authentication tokens.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Duration;
use greenlight_core::error::CoreError;
use greenlight_core::user::{validate_email, validate_password_plaintext, TokenScope};
use greenlight_core::validator::Validator;
use greenlight_db::repositories::UserRepo;
use serde::Deserialize;

use crate::auth::password::verify_password;
use crate::auth::token::{issue_token, IssuedToken, AUTHENTICATION_TTL_HOURS};
use crate::error::AppResult;
use crate::json::ReadJson;
use crate::response::Envelope;
use crate::state::AppState;

/// Request body for `POST /v1/tokens/authentication`.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CredentialsInput {
    pub email: String,
    pub password: String,
}

/// POST /v1/tokens/authentication
///
/// Exchanges an email and password for a 24-hour bearer token. An unknown
/// email and a wrong password produce the same response.
pub async fn create_authentication_token(
    State(state): State<AppState>,
    ReadJson(input): ReadJson<CredentialsInput>,
) -> AppResult<(StatusCode, Json<Envelope<IssuedToken>>)> {
    let mut v = Validator::new();
    validate_email(&mut v, &input.email);
    validate_password_plaintext(&mut v, &input.password);
    v.into_result()?;

    let user = UserRepo::get_by_email(&state.pool, &input.email)
        .await?
        .ok_or(CoreError::InvalidCredentials)?;

    if !verify_password(&input.password, &user.password_hash).await? {
        tracing::debug!(user_id = user.id, "Password mismatch");
        return Err(CoreError::InvalidCredentials.into());
    }

    let token = issue_token(
        &state.pool,
        user.id,
        Duration::hours(AUTHENTICATION_TTL_HOURS),
        TokenScope::Authentication,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(Envelope::new("authentication_token", token)),
    ))
}
