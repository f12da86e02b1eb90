//! Request and response wire models.

use chrono::{DateTime, Utc};
use cinedex_core::models::auth::TokenPair;
use cinedex_core::models::movie::{MovieRow, NewMovie};
use serde::{Deserialize, Serialize};

/// Structured error body returned for every failure.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Stable error category (e.g. `validation_error`).
    pub error: String,
    /// Short human-readable message.
    pub message: String,
    /// Optional extra context.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
}

impl From<TokenPair> for TokenResponse {
    fn from(pair: TokenPair) -> Self {
        Self {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateMovieRequest {
    pub title: String,
    pub director: String,
    pub year: i32,
    #[serde(default)]
    pub plot: Option<String>,
}

impl From<CreateMovieRequest> for NewMovie {
    fn from(req: CreateMovieRequest) -> Self {
        Self {
            title: req.title,
            director: req.director,
            year: req.year,
            plot: req.plot,
        }
    }
}

/// Full-replace update payload; same shape as create.
#[derive(Debug, Deserialize)]
pub struct UpdateMovieRequest {
    pub title: String,
    pub director: String,
    pub year: i32,
    #[serde(default)]
    pub plot: Option<String>,
}

impl From<UpdateMovieRequest> for NewMovie {
    fn from(req: UpdateMovieRequest) -> Self {
        Self {
            title: req.title,
            director: req.director,
            year: req.year,
            plot: req.plot,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct BulkInsertRequest {
    pub movies: Vec<CreateMovieRequest>,
}

#[derive(Debug, Serialize)]
pub struct CreateMovieResponse {
    pub id: i64,
}

#[derive(Debug, Serialize)]
pub struct MovieResponse {
    pub id: i64,
    pub title: String,
    pub director: String,
    pub year: i32,
    pub plot: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<MovieRow> for MovieResponse {
    fn from(row: MovieRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            director: row.director,
            year: row.year,
            plot: row.plot,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MovieListResponse {
    pub movies: Vec<MovieResponse>,
    /// Total size of the filtered set before pagination.
    pub count: i64,
}

/// Query parameters accepted by `GET /movies`.
#[derive(Debug, Default, Deserialize)]
pub struct ListMoviesParams {
    pub title: Option<String>,
    pub director: Option<String>,
    pub year: Option<i32>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub db_connected: bool,
}
