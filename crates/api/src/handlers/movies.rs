//! Handlers for the `/movies` resource.

use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use chrono::Datelike;
use marquee_core::filters::{validate_filters, Filters};
use marquee_core::types::DbId;
use marquee_core::validator::Validator;
use marquee_db::error::StoreError;
use marquee_db::models::movie::{validate_movie, Movie, MovieFields, UpdateMovie, SORT_SAFELIST};
use marquee_db::repositories::MovieRepo;

use crate::error::{AppError, AppResult};
use crate::json::StrictJson;
use crate::query::{read_csv, read_int, read_string, ListMoviesParams};
use crate::response::{DataResponse, MessageResponse, PageResponse};
use crate::state::AppState;

/// Optional precondition on `PATCH`: the version the client last saw.
const EXPECTED_VERSION_HEADER: &str = "x-expected-version";

/// POST /v1/movies
///
/// Create a movie. Responds 201 with a `Location` header pointing at it.
pub async fn create_movie(
    State(state): State<AppState>,
    StrictJson(input): StrictJson<MovieFields>,
) -> AppResult<impl IntoResponse> {
    let mut v = Validator::new();
    validate_movie(&mut v, &input, current_year());
    v.finish()?;

    let movie = MovieRepo::insert(&state.pool, &input).await?;
    tracing::info!(movie_id = movie.id, "Movie created");

    let location = format!("/v1/movies/{}", movie.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(DataResponse { data: movie }),
    ))
}

/// GET /v1/movies/{id}
pub async fn show_movie(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<Movie>>> {
    let id = parse_id(&id)?;
    let movie = MovieRepo::get(&state.pool, id).await?;
    Ok(Json(DataResponse { data: movie }))
}

/// PATCH /v1/movies/{id}
///
/// Partial update: absent keys keep their stored values. The write only
/// lands if nobody else updated the movie since it was read here; if an
/// `X-Expected-Version` header is sent it must also match.
pub async fn update_movie(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    StrictJson(patch): StrictJson<UpdateMovie>,
) -> AppResult<Json<DataResponse<Movie>>> {
    let id = parse_id(&id)?;
    let mut movie = MovieRepo::get(&state.pool, id).await?;

    if let Some(expected) = expected_version(&headers)? {
        if expected != movie.version {
            return Err(StoreError::EditConflict.into());
        }
    }

    patch.apply_to(&mut movie.fields);

    let mut v = Validator::new();
    validate_movie(&mut v, &movie.fields, current_year());
    v.finish()?;

    MovieRepo::update(&state.pool, &mut movie).await?;
    tracing::info!(movie_id = movie.id, version = movie.version, "Movie updated");

    Ok(Json(DataResponse { data: movie }))
}

/// DELETE /v1/movies/{id}
pub async fn delete_movie(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let id = parse_id(&id)?;
    MovieRepo::delete(&state.pool, id).await?;
    tracing::info!(movie_id = id, "Movie deleted");

    Ok(Json(MessageResponse {
        message: "movie successfully deleted",
    }))
}

/// GET /v1/movies
///
/// Filter by full-text `title` and a comma-separated `genres` superset,
/// then sort and paginate.
pub async fn list_movies(
    State(state): State<AppState>,
    Query(params): Query<ListMoviesParams>,
) -> AppResult<Json<PageResponse<Movie>>> {
    let mut v = Validator::new();

    let title = read_string(params.title.as_deref(), "");
    let genres = read_csv(params.genres.as_deref());
    let filters = Filters {
        page: read_int(params.page.as_deref(), "page", 1, &mut v),
        page_size: read_int(params.page_size.as_deref(), "page_size", 20, &mut v),
        sort: read_string(params.sort.as_deref(), "id"),
        sort_safelist: SORT_SAFELIST,
    };

    validate_filters(&mut v, &filters);
    v.finish()?;

    let (movies, metadata) = MovieRepo::list(&state.pool, &title, &genres, &filters).await?;
    Ok(Json(PageResponse {
        data: movies,
        metadata,
    }))
}

/// A path id that is not a positive integer names no movie.
fn parse_id(raw: &str) -> AppResult<DbId> {
    match raw.parse::<DbId>() {
        Ok(id) if id >= 1 => Ok(id),
        _ => Err(AppError::NotFound),
    }
}

fn expected_version(headers: &HeaderMap) -> AppResult<Option<i32>> {
    let Some(value) = headers.get(EXPECTED_VERSION_HEADER) else {
        return Ok(None);
    };
    value
        .to_str()
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .map(Some)
        .ok_or_else(|| AppError::BadRequest("X-Expected-Version must be an integer".into()))
}

fn current_year() -> i32 {
    chrono::Utc::now().year()
}
