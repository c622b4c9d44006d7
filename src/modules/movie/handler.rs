use super::dto::ListMoviesQuery;
use super::model::{Movie, MoviePatch, NewMovie};
use super::service::{MovieError, MovieService};
use crate::common::response::{
    ApiError, ApiSuccess, ErrorBody, MessageBody, ValidationErrorBody,
};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::Value;

const NOT_FOUND: &str = "Movie not found";

/// List movies, optionally filtered by genre
#[utoipa::path(
    get,
    path = "/movies",
    params(ListMoviesQuery),
    responses(
        (status = 200, description = "Movies in insertion order", body = Vec<Movie>)
    ),
    tag = "Movies"
)]
pub async fn list_movies(
    State(state): State<AppState>,
    Query(query): Query<ListMoviesQuery>,
) -> impl IntoResponse {
    let movies = MovieService::list(&state.movies, query.genre.as_deref()).await;
    ApiSuccess(movies, StatusCode::OK)
}

/// Get movie by ID
#[utoipa::path(
    get,
    path = "/movies/{id}",
    params(
        ("id" = String, Path, description = "Movie ID")
    ),
    responses(
        (status = 200, description = "Movie details", body = Movie),
        (status = 404, description = "Movie not found", body = MessageBody)
    ),
    tag = "Movies"
)]
pub async fn get_movie(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match MovieService::get(&state.movies, &id).await {
        Ok(movie) => ApiSuccess(movie, StatusCode::OK).into_response(),
        Err(_) => ApiError::Message(NOT_FOUND.to_string(), StatusCode::NOT_FOUND).into_response(),
    }
}

/// Create a new movie
#[utoipa::path(
    post,
    path = "/movies",
    request_body = NewMovie,
    responses(
        (status = 201, description = "Movie created", body = Movie),
        (status = 400, description = "Invalid payload", body = ValidationErrorBody)
    ),
    tag = "Movies"
)]
pub async fn create_movie(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> impl IntoResponse {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return ApiError::from(rejection).into_response(),
    };

    match MovieService::create(&state.movies, &payload).await {
        Ok(movie) => ApiSuccess(movie, StatusCode::CREATED).into_response(),
        Err(err) => ApiError::Invalid(err).into_response(),
    }
}

/// Partially update a movie
#[utoipa::path(
    patch,
    path = "/movies/{id}",
    params(
        ("id" = String, Path, description = "Movie ID")
    ),
    request_body = MoviePatch,
    responses(
        (status = 200, description = "Movie updated", body = Movie),
        (status = 400, description = "Invalid payload", body = ValidationErrorBody),
        (status = 404, description = "Movie not found", body = ErrorBody)
    ),
    tag = "Movies"
)]
pub async fn update_movie(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> impl IntoResponse {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return ApiError::from(rejection).into_response(),
    };

    match MovieService::update(&state.movies, &id, &payload).await {
        Ok(movie) => ApiSuccess(movie, StatusCode::OK).into_response(),
        Err(MovieError::Invalid(err)) => ApiError::Invalid(err).into_response(),
        Err(MovieError::NotFound) => {
            ApiError::Error(NOT_FOUND.to_string(), StatusCode::NOT_FOUND).into_response()
        }
    }
}

/// Delete a movie
#[utoipa::path(
    delete,
    path = "/movies/{id}",
    params(
        ("id" = String, Path, description = "Movie ID")
    ),
    responses(
        (status = 200, description = "Movie deleted", body = MessageBody),
        (status = 404, description = "Movie not found", body = MessageBody)
    ),
    tag = "Movies"
)]
pub async fn delete_movie(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match MovieService::delete(&state.movies, &id).await {
        Ok(_) => ApiSuccess::message("Movie deleted", StatusCode::OK).into_response(),
        Err(_) => ApiError::Message(NOT_FOUND.to_string(), StatusCode::NOT_FOUND).into_response(),
    }
}

/// Cross-origin pre-flight for removal and update
#[utoipa::path(
    options,
    path = "/movies/{id}",
    params(
        ("id" = String, Path, description = "Movie ID")
    ),
    responses(
        (status = 204, description = "Pre-flight accepted")
    ),
    tag = "Movies"
)]
pub async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}
