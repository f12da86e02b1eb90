//! Authentication logic.
//!
//! Provides credential verification, the JWT codec, and the configuration
//! both rely on. Tokens are stateless: validity is a signature check plus an
//! expiry check, nothing is persisted.

pub mod credentials;
pub mod token;

use chrono::Duration;
use thiserror::Error;

use crate::auth::credentials::StaticCredentials;
use crate::auth::token::TokenKind;

/// Default access token lifetime: 24 hours.
const DEFAULT_ACCESS_TTL_SECS: i64 = 24 * 60 * 60;

/// Default refresh token lifetime: 7 days.
const DEFAULT_REFRESH_TTL_SECS: i64 = 7 * 24 * 60 * 60;

/// Authentication errors.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    TokenInvalid,

    #[error("Token error: {0}")]
    TokenError(String),
}

/// Signing secrets, token lifetimes, and the configured credential pair.
///
/// Access and refresh tokens are signed with distinct secrets so a token of
/// one kind never verifies as the other.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub credentials: StaticCredentials,
    pub access_secret: String,
    pub refresh_secret: String,
    pub access_ttl: Duration,
    pub refresh_ttl: Duration,
}

impl AuthConfig {
    /// Reads auth configuration from environment variables.
    ///
    /// | Variable                 | Default          |
    /// |--------------------------|------------------|
    /// | `ADMIN_USERNAME`         | `admin`          |
    /// | `ADMIN_PASSWORD`         | `password123`    |
    /// | `JWT_ACCESS_SECRET`      | `access_secret`  |
    /// | `JWT_REFRESH_SECRET`     | `refresh_secret` |
    /// | `ACCESS_TOKEN_TTL_SECS`  | 86400 (24 h)     |
    /// | `REFRESH_TOKEN_TTL_SECS` | 604800 (7 d)     |
    pub fn from_env() -> Self {
        Self {
            credentials: StaticCredentials::from_env(),
            access_secret: std::env::var("JWT_ACCESS_SECRET")
                .unwrap_or_else(|_| "access_secret".into()),
            refresh_secret: std::env::var("JWT_REFRESH_SECRET")
                .unwrap_or_else(|_| "refresh_secret".into()),
            access_ttl: Duration::seconds(env_i64(
                "ACCESS_TOKEN_TTL_SECS",
                DEFAULT_ACCESS_TTL_SECS,
            )),
            refresh_ttl: Duration::seconds(env_i64(
                "REFRESH_TOKEN_TTL_SECS",
                DEFAULT_REFRESH_TTL_SECS,
            )),
        }
    }

    /// Signing secret for the given token kind.
    pub fn secret(&self, kind: TokenKind) -> &[u8] {
        match kind {
            TokenKind::Access => self.access_secret.as_bytes(),
            TokenKind::Refresh => self.refresh_secret.as_bytes(),
        }
    }

    /// Lifetime for the given token kind.
    pub fn ttl(&self, kind: TokenKind) -> Duration {
        match kind {
            TokenKind::Access => self.access_ttl,
            TokenKind::Refresh => self.refresh_ttl,
        }
    }
}

fn env_i64(key: &str, default: i64) -> i64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
