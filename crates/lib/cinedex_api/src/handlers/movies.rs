//! Movie request handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::models::{
    BulkInsertRequest, CreateMovieRequest, CreateMovieResponse, ListMoviesParams,
    MovieListResponse, MovieResponse, UpdateMovieRequest,
};
use crate::services::movies;

/// `GET /movies` — list movies with optional filters, sorting, pagination.
pub async fn list_movies_handler(
    State(state): State<AppState>,
    Query(params): Query<ListMoviesParams>,
) -> AppResult<Json<MovieListResponse>> {
    let resp = movies::list(&state.pool, params).await?;
    Ok(Json(resp))
}

/// `GET /movies/{id}` — fetch a single movie.
pub async fn get_movie_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<MovieResponse>> {
    check_id(id)?;
    let resp = movies::get(&state.pool, id).await?;
    Ok(Json(resp))
}

/// `GET /movies/title/{title}` — fetch a movie by exact title.
pub async fn get_movie_by_title_handler(
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> AppResult<Json<MovieResponse>> {
    let resp = movies::get_by_title(&state.pool, &title).await?;
    Ok(Json(resp))
}

/// `POST /movies` — create a new movie. Requires authentication.
pub async fn create_movie_handler(
    State(state): State<AppState>,
    Json(body): Json<CreateMovieRequest>,
) -> AppResult<(StatusCode, Json<CreateMovieResponse>)> {
    let resp = movies::create(&state.pool, body).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

/// `PUT /movies/{id}` — fully replace a movie's fields. Requires authentication.
pub async fn update_movie_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<UpdateMovieRequest>,
) -> AppResult<StatusCode> {
    check_id(id)?;
    movies::update(&state.pool, id, body).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /movies/{id}` — soft-delete a movie. Requires authentication.
pub async fn delete_movie_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    check_id(id)?;
    movies::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /movies/bulk-insert` — insert a batch atomically. Requires authentication.
pub async fn bulk_insert_handler(
    State(state): State<AppState>,
    Json(body): Json<BulkInsertRequest>,
) -> AppResult<StatusCode> {
    movies::bulk_insert(&state.pool, body).await?;
    Ok(StatusCode::NO_CONTENT)
}

fn check_id(id: i64) -> AppResult<()> {
    if id <= 0 {
        return Err(AppError::Validation(
            "Movie ID must be a positive integer".into(),
        ));
    }
    Ok(())
}
