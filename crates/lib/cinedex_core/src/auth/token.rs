//! JWT token generation and verification.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};

use super::{AuthConfig, AuthError};
use crate::models::auth::{TokenClaims, TokenPair};

/// The two token kinds, each signed with its own secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Short-lived, authorizes individual requests.
    Access,
    /// Long-lived, only good for minting new pairs.
    Refresh,
}

/// Sign a JWT (HS256) carrying the subject, issued now, expiring after `ttl`.
pub fn issue(subject: &str, secret: &[u8], ttl: Duration) -> Result<String, AuthError> {
    let now = Utc::now();
    let claims = TokenClaims {
        sub: subject.to_string(),
        iat: now.timestamp(),
        exp: (now + ttl).timestamp(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret),
    )
    .map_err(|e| AuthError::TokenError(format!("jwt encode: {e}")))
}

/// Verify a JWT against `secret`, returning the claims on success.
///
/// Expiry is checked with zero leeway: a token whose `exp` has passed fails
/// with [`AuthError::TokenExpired`]; a bad signature or malformed structure
/// fails with [`AuthError::TokenInvalid`].
pub fn verify(token: &str, secret: &[u8]) -> Result<TokenClaims, AuthError> {
    let key = DecodingKey::from_secret(secret);
    let mut validation = Validation::default();
    validation.validate_exp = true;
    validation.leeway = 0;
    decode::<TokenClaims>(token, &key, &validation)
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::TokenInvalid,
        })
}

/// Issue a fresh access + refresh pair for `subject`.
pub fn issue_pair(subject: &str, config: &AuthConfig) -> Result<TokenPair, AuthError> {
    Ok(TokenPair {
        access_token: issue(
            subject,
            config.secret(TokenKind::Access),
            config.ttl(TokenKind::Access),
        )?,
        refresh_token: issue(
            subject,
            config.secret(TokenKind::Refresh),
            config.ttl(TokenKind::Refresh),
        )?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::credentials::StaticCredentials;

    fn test_config() -> AuthConfig {
        AuthConfig {
            credentials: StaticCredentials::default(),
            access_secret: "test-access-secret".into(),
            refresh_secret: "test-refresh-secret".into(),
            access_ttl: Duration::minutes(15),
            refresh_ttl: Duration::days(7),
        }
    }

    #[test]
    fn issue_then_verify_round_trips_subject() {
        let token = issue("admin", b"secret", Duration::minutes(5)).unwrap();
        let claims = verify(&token, b"secret").unwrap();
        assert_eq!(claims.sub, "admin");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn wrong_secret_is_invalid() {
        let token = issue("admin", b"secret", Duration::minutes(5)).unwrap();
        assert!(matches!(
            verify(&token, b"other-secret"),
            Err(AuthError::TokenInvalid)
        ));
    }

    #[test]
    fn garbage_is_invalid() {
        assert!(matches!(
            verify("not-a-jwt", b"secret"),
            Err(AuthError::TokenInvalid)
        ));
    }

    #[test]
    fn expired_token_fails_with_expired_even_when_well_signed() {
        let token = issue("admin", b"secret", Duration::seconds(-60)).unwrap();
        assert!(matches!(
            verify(&token, b"secret"),
            Err(AuthError::TokenExpired)
        ));
    }

    #[test]
    fn pair_uses_distinct_secrets_per_kind() {
        let config = test_config();
        let pair = issue_pair("admin", &config).unwrap();

        let access = verify(&pair.access_token, config.secret(TokenKind::Access)).unwrap();
        let refresh = verify(&pair.refresh_token, config.secret(TokenKind::Refresh)).unwrap();
        assert_eq!(access.sub, refresh.sub);

        // Cross-verification must fail in both directions.
        assert!(verify(&pair.refresh_token, config.secret(TokenKind::Access)).is_err());
        assert!(verify(&pair.access_token, config.secret(TokenKind::Refresh)).is_err());
    }
}
