/// Request principal resolution
///
/// Turns an inbound bearer token into the request's principal: validate the
/// token, then load the user record the subject names. This runs exactly
/// once per request, before any handler logic, and the resolved
/// [`User`] is passed explicitly into every service call.
///
/// Every failure here means the request is unauthenticated. The distinction
/// between a bad token, an unknown subject (e.g. a user deleted after the
/// token was issued), and a disabled account is kept for logging, but all
/// of them must surface to the client identically.

use crate::auth::token::{self, TokenError};
use crate::models::user::User;
use crate::store::{StoreError, UserStore};

/// Error type for principal resolution
#[derive(Debug, thiserror::Error)]
pub enum PrincipalError {
    /// Token failed validation (signature, expiry, issuer, format)
    #[error("invalid token: {0}")]
    InvalidToken(#[from] TokenError),

    /// Token was valid but its subject matches no user record
    #[error("token subject does not match any user")]
    UnknownSubject,

    /// Token was valid but the account is disabled
    #[error("account is disabled")]
    Disabled,

    /// The user store failed
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Resolves a bearer token to the current principal
///
/// # Errors
///
/// - [`PrincipalError::InvalidToken`] if the token does not validate
/// - [`PrincipalError::UnknownSubject`] if no user has the subject username
/// - [`PrincipalError::Disabled`] if the account is disabled
/// - [`PrincipalError::Store`] if the lookup itself fails
pub async fn resolve_principal(
    users: &dyn UserStore,
    bearer: &str,
    secret: &str,
) -> Result<User, PrincipalError> {
    let claims = token::validate_token(bearer, secret)?;

    let user = users
        .find_by_username(&claims.sub)
        .await?
        .ok_or(PrincipalError::UnknownSubject)?;

    if !user.enabled {
        tracing::debug!(username = %user.username, "rejected token for disabled account");
        return Err(PrincipalError::Disabled);
    }

    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::token::{create_token, default_ttl, Claims};
    use crate::models::user::{CreateUser, Role};
    use crate::store::memory::MemUserStore;
    use chrono::Duration;

    const SECRET: &str = "test-secret-key-at-least-32-bytes-long";

    async fn store_with_user(username: &str, enabled: bool) -> MemUserStore {
        let store = MemUserStore::new();
        store
            .create(CreateUser {
                username: username.to_string(),
                email: format!("{}@example.com", username),
                password_hash: "$argon2id$irrelevant".to_string(),
                role: Role::User,
                enabled,
            })
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn test_valid_token_resolves_to_user() {
        let store = store_with_user("alice", true).await;
        let token = create_token(&Claims::new("alice", default_ttl()), SECRET).unwrap();

        let user = resolve_principal(&store, &token, SECRET).await.unwrap();
        assert_eq!(user.username, "alice");
    }

    #[tokio::test]
    async fn test_expired_token_is_rejected() {
        let store = store_with_user("alice", true).await;
        let token =
            create_token(&Claims::new("alice", Duration::hours(-1)), SECRET).unwrap();

        let result = resolve_principal(&store, &token, SECRET).await;
        assert!(matches!(result, Err(PrincipalError::InvalidToken(_))));
    }

    #[tokio::test]
    async fn test_unknown_subject_is_rejected() {
        let store = store_with_user("alice", true).await;
        let token = create_token(&Claims::new("ghost", default_ttl()), SECRET).unwrap();

        let result = resolve_principal(&store, &token, SECRET).await;
        assert!(matches!(result, Err(PrincipalError::UnknownSubject)));
    }

    #[tokio::test]
    async fn test_disabled_account_is_rejected() {
        let store = store_with_user("alice", false).await;
        let token = create_token(&Claims::new("alice", default_ttl()), SECRET).unwrap();

        let result = resolve_principal(&store, &token, SECRET).await;
        assert!(matches!(result, Err(PrincipalError::Disabled)));
    }

    #[tokio::test]
    async fn test_token_signed_elsewhere_is_rejected() {
        let store = store_with_user("alice", true).await;
        let token =
            create_token(&Claims::new("alice", default_ttl()), "another-secret-entirely-here!")
                .unwrap();

        let result = resolve_principal(&store, &token, SECRET).await;
        assert!(matches!(result, Err(PrincipalError::InvalidToken(_))));
    }
}
