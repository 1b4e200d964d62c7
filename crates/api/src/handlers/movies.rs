//! Handlers for the `/v1/movies` resource.

use axum::extract::State;
use axum::http::header::LOCATION;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use greenlight_core::error::CoreError;
use greenlight_core::filters::{validate_filters, Metadata};
use greenlight_core::movie::{validate_movie, SORT_SAFELIST};
use greenlight_core::types::DbId;
use greenlight_core::validator::Validator;
use greenlight_db::models::movie::{CreateMovie, Movie, UpdateMovie};
use greenlight_db::repositories::MovieRepo;

use crate::error::AppResult;
use crate::json::ReadJson;
use crate::middleware::auth::RequireActivated;
use crate::path::IdParam;
use crate::query::QueryValues;
use crate::response::Envelope;
use crate::state::AppState;

/// Optional precondition header for `PATCH`: the version the client last saw.
pub const EXPECTED_VERSION_HEADER: &str = "x-expected-version";

fn not_found(id: DbId) -> CoreError {
    CoreError::NotFound { entity: "Movie", id }
}

/// GET /v1/movies?title=&genres=&page=&page_size=&sort=
pub async fn list(
    State(state): State<AppState>,
    query: QueryValues,
) -> AppResult<Json<Envelope<Vec<Movie>>>> {
    let mut v = Validator::new();
    let title = query.read_string("title", "");
    let genres = query.read_csv("genres", &[]);
    let filters = query.read_filters("id", SORT_SAFELIST, &mut v);
    validate_filters(&mut v, &filters);
    v.into_result()?;

    let (movies, total) = MovieRepo::get_all(&state.pool, &title, &genres, &filters).await?;
    let metadata = Metadata::calculate(total, filters.page, filters.page_size);

    Ok(Json(Envelope::new("movies", movies).with_metadata(metadata)))
}

/// POST /v1/movies
pub async fn create(
    State(state): State<AppState>,
    RequireActivated(auth): RequireActivated,
    ReadJson(input): ReadJson<CreateMovie>,
) -> AppResult<impl IntoResponse> {
    let mut v = Validator::new();
    validate_movie(&mut v, &input.title, input.year, input.runtime, &input.genres);
    v.into_result()?;

    let movie = MovieRepo::insert(&state.pool, &input).await?;
    tracing::info!(movie_id = movie.id, user_id = auth.user.id, "Movie created");

    let location = format!("/v1/movies/{}", movie.id);
    Ok((
        StatusCode::CREATED,
        [(LOCATION, location)],
        Json(Envelope::new("movie", movie)),
    ))
}

/// GET /v1/movies/{id}
pub async fn show(
    State(state): State<AppState>,
    IdParam(id): IdParam,
) -> AppResult<Json<Envelope<Movie>>> {
    let movie = MovieRepo::get(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(Envelope::new("movie", movie)))
}

/// PATCH /v1/movies/{id}
///
/// Only the fields present in the body change. When `X-Expected-Version` is
/// sent and does not match the stored version, the update is refused with
/// an edit conflict before anything is written.
pub async fn update(
    State(state): State<AppState>,
    RequireActivated(auth): RequireActivated,
    IdParam(id): IdParam,
    headers: HeaderMap,
    ReadJson(input): ReadJson<UpdateMovie>,
) -> AppResult<Json<Envelope<Movie>>> {
    let mut movie = MovieRepo::get(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    if let Some(expected) = headers.get(EXPECTED_VERSION_HEADER) {
        if !version_matches(expected.to_str().unwrap_or_default(), movie.version) {
            return Err(CoreError::EditConflict.into());
        }
    }

    input.apply(&mut movie);

    let mut v = Validator::new();
    validate_movie(&mut v, &movie.title, movie.year, movie.runtime, &movie.genres);
    v.into_result()?;

    let movie = MovieRepo::update(&state.pool, &movie)
        .await?
        .ok_or(CoreError::EditConflict)?;
    tracing::info!(
        movie_id = id,
        version = movie.version,
        user_id = auth.user.id,
        "Movie updated"
    );

    Ok(Json(Envelope::new("movie", movie)))
}

/// DELETE /v1/movies/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireActivated(auth): RequireActivated,
    IdParam(id): IdParam,
) -> AppResult<Json<Envelope<&'static str>>> {
    if !MovieRepo::delete(&state.pool, id).await? {
        return Err(not_found(id).into());
    }
    tracing::info!(movie_id = id, user_id = auth.user.id, "Movie deleted");
    Ok(Json(Envelope::new("message", "movie successfully deleted")))
}

fn version_matches(header: &str, version: i32) -> bool {
    header.trim().parse::<i32>().is_ok_and(|expected| expected == version)
}
