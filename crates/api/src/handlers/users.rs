//! Handlers for user registration and activation.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Duration;
use greenlight_core::error::CoreError;
use greenlight_core::user::{validate_token_plaintext, validate_user, TokenScope};
use greenlight_core::validator::Validator;
use greenlight_db::is_unique_violation;
use greenlight_db::models::user::{CreateUser, UserResponse};
use greenlight_db::repositories::user_repo::EMAIL_UNIQUE_CONSTRAINT;
use greenlight_db::repositories::{TokenRepo, UserRepo};
use serde::Deserialize;

use crate::auth::password::hash_password;
use crate::auth::token::{hash_token, issue_token, ACTIVATION_TTL_HOURS};
use crate::background::spawn_background;
use crate::error::{AppError, AppResult};
use crate::json::ReadJson;
use crate::response::Envelope;
use crate::state::AppState;

/// Request body for `POST /v1/users`.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegisterUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Request body for `PUT /v1/users/activated`.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ActivateUser {
    pub token: String,
}

/// POST /v1/users
///
/// Creates an inactive account and emails an activation token in the
/// background. Responds 202 because delivery has not happened yet.
pub async fn register(
    State(state): State<AppState>,
    ReadJson(input): ReadJson<RegisterUser>,
) -> AppResult<(StatusCode, Json<Envelope<UserResponse>>)> {
    let mut v = Validator::new();
    validate_user(&mut v, &input.name, &input.email, &input.password);
    v.into_result()?;

    let new_user = CreateUser {
        name: input.name,
        email: input.email,
        password_hash: hash_password(&input.password).await?,
    };

    let user = UserRepo::insert(&state.pool, &new_user)
        .await
        .map_err(|e| {
            if is_unique_violation(&e, EMAIL_UNIQUE_CONSTRAINT) {
                AppError::field("email", "a user with this email address already exists")
            } else {
                AppError::Database(e)
            }
        })?;

    let token = issue_token(
        &state.pool,
        user.id,
        Duration::hours(ACTIVATION_TTL_HOURS),
        TokenScope::Activation,
    )
    .await?;

    tracing::info!(user_id = user.id, "User registered");

    match &state.mailer {
        Some(mailer) => {
            let mailer = Arc::clone(mailer);
            let (email, user_id) = (user.email.clone(), user.id);
            spawn_background(&state.background, "welcome_email", async move {
                mailer.send_welcome(&email, user_id, &token.plaintext).await
            });
        }
        None => {
            tracing::warn!(user_id = user.id, "SMTP not configured, welcome email skipped");
        }
    }

    Ok((
        StatusCode::ACCEPTED,
        Json(Envelope::new("user", UserResponse::from(&user))),
    ))
}

/// PUT /v1/users/activated
pub async fn activate(
    State(state): State<AppState>,
    ReadJson(input): ReadJson<ActivateUser>,
) -> AppResult<Json<Envelope<UserResponse>>> {
    let mut v = Validator::new();
    validate_token_plaintext(&mut v, &input.token);
    v.into_result()?;

    let mut user =
        UserRepo::get_for_token(&state.pool, TokenScope::Activation, &hash_token(&input.token))
            .await?
            .ok_or_else(|| AppError::field("token", "invalid or expired activation token"))?;

    user.activated = true;
    let user = UserRepo::update(&state.pool, &user)
        .await?
        .ok_or(CoreError::EditConflict)?;

    TokenRepo::delete_all_for_user(&state.pool, TokenScope::Activation, user.id).await?;
    tracing::info!(user_id = user.id, "User activated");

    Ok(Json(Envelope::new("user", UserResponse::from(&user))))
}
