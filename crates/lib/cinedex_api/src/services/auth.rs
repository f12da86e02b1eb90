//! Authentication service — credential check and token pair issuance.

use cinedex_core::auth::credentials::CredentialVerifier;
use cinedex_core::auth::token::{self, TokenKind};
use cinedex_core::auth::{AuthConfig, AuthError};
use cinedex_core::models::auth::TokenPair;
use tracing::info;

use crate::error::AppResult;

/// Authenticate with username + password and issue a fresh token pair.
pub fn login(config: &AuthConfig, username: &str, password: &str) -> AppResult<TokenPair> {
    if !config.credentials.verify(username, password) {
        return Err(AuthError::InvalidCredentials.into());
    }
    let pair = token::issue_pair(username, config)?;
    info!(subject = username, "issued token pair");
    Ok(pair)
}

/// Exchange a valid refresh token for a brand-new access + refresh pair.
///
/// Tokens are stateless, so the old refresh token stays valid until its
/// natural expiry; multiple pairs can coexist for the same subject.
pub fn refresh(config: &AuthConfig, refresh_token: &str) -> AppResult<TokenPair> {
    let claims = token::verify(refresh_token, config.secret(TokenKind::Refresh))?;
    let pair = token::issue_pair(&claims.sub, config)?;
    Ok(pair)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use chrono::Duration;
    use cinedex_core::auth::credentials::StaticCredentials;

    fn test_config() -> AuthConfig {
        AuthConfig {
            credentials: StaticCredentials::new("admin", "password123"),
            access_secret: "test-access-secret".into(),
            refresh_secret: "test-refresh-secret".into(),
            access_ttl: Duration::minutes(15),
            refresh_ttl: Duration::days(7),
        }
    }

    #[test]
    fn login_issues_pair_verifying_under_each_secret() {
        let config = test_config();
        let pair = login(&config, "admin", "password123").unwrap();

        let access =
            token::verify(&pair.access_token, config.secret(TokenKind::Access)).unwrap();
        let refresh =
            token::verify(&pair.refresh_token, config.secret(TokenKind::Refresh)).unwrap();
        assert_eq!(access.sub, "admin");
        assert_eq!(refresh.sub, "admin");
    }

    #[test]
    fn login_rejects_every_other_combination() {
        let config = test_config();
        for (user, pass) in [
            ("admin", "wrong"),
            ("wrong", "password123"),
            ("", ""),
            ("Admin", "password123"),
        ] {
            assert!(matches!(
                login(&config, user, pass),
                Err(AppError::Unauthorized(_))
            ));
        }
    }

    #[test]
    fn refresh_preserves_subject() {
        let config = test_config();
        let pair = login(&config, "admin", "password123").unwrap();
        let rotated = refresh(&config, &pair.refresh_token).unwrap();

        let claims =
            token::verify(&rotated.access_token, config.secret(TokenKind::Access)).unwrap();
        assert_eq!(claims.sub, "admin");
    }

    #[test]
    fn refresh_rejects_an_access_token() {
        let config = test_config();
        let pair = login(&config, "admin", "password123").unwrap();
        assert!(matches!(
            refresh(&config, &pair.access_token),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn refresh_rejects_expired_refresh_token() {
        let mut config = test_config();
        config.refresh_ttl = Duration::seconds(-60);
        let pair = login(&config, "admin", "password123").unwrap();
        assert!(matches!(
            refresh(&config, &pair.refresh_token),
            Err(AppError::Unauthorized(_))
        ));
    }
}
