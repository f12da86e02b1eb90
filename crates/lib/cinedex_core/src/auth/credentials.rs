//! Credential verification.
//!
//! The service holds exactly one valid identity/secret pair, supplied by
//! configuration. Verification goes through the [`CredentialVerifier`] trait
//! so a password-hash table or external identity provider can replace the
//! static pair without touching the auth flow.

/// Verifies an identity assertion against a secret.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, identity: &str, secret: &str) -> bool;
}

/// The single statically configured credential pair.
#[derive(Debug, Clone)]
pub struct StaticCredentials {
    pub username: String,
    pub password: String,
}

impl StaticCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Reads the pair from `ADMIN_USERNAME` / `ADMIN_PASSWORD`.
    pub fn from_env() -> Self {
        Self {
            username: std::env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".into()),
            password: std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "password123".into()),
        }
    }
}

impl Default for StaticCredentials {
    fn default() -> Self {
        Self::new("admin", "password123")
    }
}

impl CredentialVerifier for StaticCredentials {
    /// Case-sensitive comparison of both parts. Plaintext storage is a known
    /// weakness of the single-pair design; a hashing backend slots in behind
    /// the trait.
    fn verify(&self, identity: &str, secret: &str) -> bool {
        identity == self.username && secret == self.password
    }
}
