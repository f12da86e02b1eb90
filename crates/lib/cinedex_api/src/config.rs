//! API server configuration.

use cinedex_core::auth::AuthConfig;

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "127.0.0.1:8080").
    pub bind_addr: String,
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// Credential pair, signing secrets, and token lifetimes.
    pub auth: AuthConfig,
}

impl ApiConfig {
    /// Reads configuration from environment variables with sensible defaults.
    ///
    /// | Variable       | Default                               |
    /// |----------------|---------------------------------------|
    /// | `BIND_ADDR`    | `127.0.0.1:8080`                      |
    /// | `DATABASE_URL` | `postgres://localhost:5432/cinedex`   |
    ///
    /// Auth variables are documented on [`AuthConfig::from_env`].
    pub fn from_env() -> Self {
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".into()),
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "postgres://localhost:5432/cinedex".into()),
            auth: AuthConfig::from_env(),
        }
    }
}
