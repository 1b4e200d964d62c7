//! Handlers for the `/v1/trailers` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use greenlight_core::filters::{validate_filters, Metadata};
use greenlight_core::trailer::{validate_trailer, SORT_SAFELIST};
use greenlight_core::validator::Validator;
use greenlight_db::models::trailer::{CreateTrailer, Trailer};
use greenlight_db::repositories::TrailerRepo;

use crate::error::AppResult;
use crate::json::ReadJson;
use crate::middleware::auth::RequireActivated;
use crate::query::QueryValues;
use crate::response::Envelope;
use crate::state::AppState;

/// GET /v1/trailers?trailer_name=&page=&page_size=&sort=
pub async fn list(
    State(state): State<AppState>,
    query: QueryValues,
) -> AppResult<Json<Envelope<Vec<Trailer>>>> {
    let mut v = Validator::new();
    let trailer_name = query.read_string("trailer_name", "");
    let filters = query.read_filters("id", SORT_SAFELIST, &mut v);
    validate_filters(&mut v, &filters);
    v.into_result()?;

    let (trailers, total) = TrailerRepo::get_all(&state.pool, &trailer_name, &filters).await?;
    let metadata = Metadata::calculate(total, filters.page, filters.page_size);

    Ok(Json(Envelope::new("trailers", trailers).with_metadata(metadata)))
}

/// POST /v1/trailers
pub async fn create(
    State(state): State<AppState>,
    RequireActivated(auth): RequireActivated,
    ReadJson(input): ReadJson<CreateTrailer>,
) -> AppResult<(StatusCode, Json<Envelope<Trailer>>)> {
    let mut v = Validator::new();
    validate_trailer(&mut v, &input.trailer_name, input.duration, &input.premier_date);
    v.into_result()?;

    let trailer = TrailerRepo::insert(&state.pool, &input).await?;
    tracing::info!(trailer_id = trailer.id, user_id = auth.user.id, "Trailer created");

    Ok((StatusCode::CREATED, Json(Envelope::new("trailer", trailer))))
}
