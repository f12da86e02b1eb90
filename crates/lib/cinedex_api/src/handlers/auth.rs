//! Authentication request handlers.

use axum::Json;
use axum::extract::State;

use crate::AppState;
use crate::error::AppResult;
use crate::models::{LoginRequest, RefreshRequest, TokenResponse};
use crate::services::auth;

/// `POST /auth/login` — authenticate with username + password.
pub async fn login_handler(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> AppResult<Json<TokenResponse>> {
    let pair = auth::login(&state.config.auth, &body.username, &body.password)?;
    Ok(Json(pair.into()))
}

/// `POST /auth/refresh` — exchange a refresh token for a new token pair.
pub async fn refresh_handler(
    State(state): State<AppState>,
    Json(body): Json<RefreshRequest>,
) -> AppResult<Json<TokenResponse>> {
    let pair = auth::refresh(&state.config.auth, &body.refresh_token)?;
    Ok(Json(pair.into()))
}
