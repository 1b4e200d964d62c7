//! Handlers for the `/v1/actors` resource.

use axum::extract::State;
use axum::http::header::LOCATION;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use greenlight_core::actor::validate_actor;
use greenlight_core::error::CoreError;
use greenlight_core::validator::Validator;
use greenlight_db::models::actor::{Actor, CreateActor};
use greenlight_db::repositories::ActorRepo;

use crate::error::AppResult;
use crate::json::ReadJson;
use crate::middleware::auth::RequireActivated;
use crate::path::IdParam;
use crate::response::Envelope;
use crate::state::AppState;

/// POST /v1/actors
pub async fn create(
    State(state): State<AppState>,
    RequireActivated(auth): RequireActivated,
    ReadJson(input): ReadJson<CreateActor>,
) -> AppResult<impl IntoResponse> {
    let mut v = Validator::new();
    validate_actor(
        &mut v,
        &input.first_name,
        &input.last_name,
        input.date_of_birth,
        &input.movies_casted,
    );
    v.into_result()?;

    let actor = ActorRepo::insert(&state.pool, &input).await?;
    tracing::info!(actor_id = actor.id, user_id = auth.user.id, "Actor created");

    let location = format!("/v1/actors/{}", actor.id);
    Ok((
        StatusCode::CREATED,
        [(LOCATION, location)],
        Json(Envelope::new("actor", actor)),
    ))
}

/// GET /v1/actors/{id}
pub async fn show(
    State(state): State<AppState>,
    IdParam(id): IdParam,
) -> AppResult<Json<Envelope<Actor>>> {
    let actor = ActorRepo::get(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound { entity: "Actor", id })?;
    Ok(Json(Envelope::new("actor", actor)))
}
