/// Bearer token issue and validation
///
/// Tokens are stateless JWTs signed with HS256 and bound to a username.
/// Nothing is stored server-side: a token is valid exactly when its
/// signature verifies against the server secret, its issuer matches, and it
/// has not expired. The validity window bounds the exposure of a leaked
/// token, since there is no revocation mechanism.
///
/// Invalidity is an ordinary outcome: [`validate_token`] returns a
/// [`TokenError`] value for the caller to check, it never panics.
///
/// # Example
///
/// ```
/// use taskbook_shared::auth::token::{create_token, validate_token, default_ttl, Claims};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let secret = "an-example-secret-of-at-least-32-bytes";
/// let token = create_token(&Claims::new("alice", default_ttl()), secret)?;
///
/// let claims = validate_token(&token, secret)?;
/// assert_eq!(claims.sub, "alice");
/// # Ok(())
/// # }
/// ```

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Issuer tag embedded in every token and required at validation
pub const ISSUER: &str = "taskbook-api";

/// Default token validity window (2 hours)
pub fn default_ttl() -> Duration {
    Duration::hours(2)
}

/// Error type for token operations
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// Failed to sign a new token
    #[error("failed to create token: {0}")]
    Create(String),

    /// Token has expired
    #[error("token has expired")]
    Expired,

    /// Issuer claim does not match [`ISSUER`]
    #[error("invalid token issuer")]
    InvalidIssuer,

    /// Bad signature, malformed token, or any other validation failure
    #[error("invalid token: {0}")]
    Invalid(String),
}

/// JWT claims
///
/// - `iss`: issuer tag, always [`ISSUER`]
/// - `sub`: subject, the username the token is bound to
/// - `iat`: issued-at (Unix timestamp)
/// - `exp`: expiry, `iat` plus the validity window
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub iss: String,
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    /// Builds claims for a username with the given validity window
    pub fn new(username: &str, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            iss: ISSUER.to_string(),
            sub: username.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }

    /// Whether the expiry instant has passed
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

/// Signs a token from claims with the server secret
///
/// # Errors
///
/// Returns [`TokenError::Create`] if encoding fails. This is a server
/// fault, not a client error.
pub fn create_token(claims: &Claims, secret: &str) -> Result<String, TokenError> {
    let header = Header::new(Algorithm::HS256);
    let key = EncodingKey::from_secret(secret.as_bytes());

    encode(&header, claims, &key).map_err(|e| TokenError::Create(format!("encoding failed: {}", e)))
}

/// Validates a token and extracts its claims
///
/// Verifies the HS256 signature, the issuer, and the expiry. Every failure
/// mode (bad signature, malformed token, expired, wrong issuer) comes
/// back as a [`TokenError`] for the caller to handle as data.
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, TokenError> {
    let key = DecodingKey::from_secret(secret.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[ISSUER]);
    validation.validate_exp = true;

    let data = decode::<Claims>(token, &key, &validation).map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidIssuer => TokenError::InvalidIssuer,
        _ => TokenError::Invalid(format!("validation failed: {}", e)),
    })?;

    Ok(data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-at-least-32-bytes-long";

    #[test]
    fn test_claims_carry_issuer_and_subject() {
        let claims = Claims::new("alice", default_ttl());
        assert_eq!(claims.iss, ISSUER);
        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.exp - claims.iat, default_ttl().num_seconds());
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_roundtrip_validates_to_subject() {
        let token = create_token(&Claims::new("alice", default_ttl()), SECRET).unwrap();

        let claims = validate_token(&token, SECRET).unwrap();
        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.iss, ISSUER);
    }

    #[test]
    fn test_wrong_secret_is_invalid() {
        let token = create_token(&Claims::new("alice", default_ttl()), SECRET).unwrap();

        let result = validate_token(&token, "a-completely-different-signing-secret!");
        assert!(matches!(result, Err(TokenError::Invalid(_))));
    }

    #[test]
    fn test_expired_token_is_invalid() {
        let claims = Claims::new("alice", Duration::seconds(-3600));
        assert!(claims.is_expired());

        let token = create_token(&claims, SECRET).unwrap();
        let result = validate_token(&token, SECRET);
        assert!(matches!(result, Err(TokenError::Expired)));
    }

    #[test]
    fn test_foreign_issuer_is_invalid() {
        let mut claims = Claims::new("alice", default_ttl());
        claims.iss = "someone-else".to_string();

        let token = create_token(&claims, SECRET).unwrap();
        let result = validate_token(&token, SECRET);
        assert!(matches!(result, Err(TokenError::InvalidIssuer)));
    }

    #[test]
    fn test_garbage_token_is_invalid() {
        assert!(validate_token("not.a.jwt", SECRET).is_err());
        assert!(validate_token("", SECRET).is_err());
    }
}
