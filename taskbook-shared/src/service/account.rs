/// Account service: registration and login
///
/// Registration stores a new user with a hashed password; no token is
/// issued on register. Login verifies credentials and mints a bearer token
/// bound to the username.
///
/// Login failures are deliberately indistinguishable: an unknown username,
/// a wrong password, and a disabled account all come back as
/// [`LoginError::InvalidCredentials`], so callers cannot enumerate
/// usernames by probing.

use chrono::Duration;

use crate::auth::password::{self, PasswordError};
use crate::auth::token::{self, Claims, TokenError};
use crate::models::user::{CreateUser, Role, User};
use crate::store::{StoreError, UserStore};

/// Input for registering a new account
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Error type for registration
#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    /// The username is already taken
    #[error("username already exists")]
    DuplicateUsername,

    /// The email is already taken
    #[error("email already exists")]
    DuplicateEmail,

    /// Hashing the password failed (server fault)
    #[error(transparent)]
    Hash(#[from] PasswordError),

    /// The user store failed
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Error type for login
#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    /// Unknown username, wrong password, or disabled account
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Minting the token failed (server fault)
    #[error(transparent)]
    Token(#[from] TokenError),

    /// The user store failed
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Registers a new user account
///
/// Checks username first, then email, matching the reference behavior, so a
/// request that collides on both reports the username conflict. The new
/// account gets role `User` and is enabled immediately.
///
/// # Errors
///
/// - [`RegisterError::DuplicateUsername`] if the username is taken
/// - [`RegisterError::DuplicateEmail`] if the email is taken
pub async fn register(users: &dyn UserStore, account: NewAccount) -> Result<User, RegisterError> {
    if users.find_by_username(&account.username).await?.is_some() {
        return Err(RegisterError::DuplicateUsername);
    }
    if users.find_by_email(&account.email).await?.is_some() {
        return Err(RegisterError::DuplicateEmail);
    }

    let password_hash = password::hash_password(&account.password)?;

    let user = users
        .create(CreateUser {
            username: account.username,
            email: account.email,
            password_hash,
            role: Role::User,
            enabled: true,
        })
        .await?;

    tracing::info!(username = %user.username, "registered new account");
    Ok(user)
}

/// Verifies credentials and issues a bearer token
///
/// # Errors
///
/// Returns [`LoginError::InvalidCredentials`] whenever the credentials do
/// not check out, regardless of the underlying cause.
pub async fn login(
    users: &dyn UserStore,
    username: &str,
    password: &str,
    secret: &str,
    ttl: Duration,
) -> Result<String, LoginError> {
    let user = users
        .find_by_username(username)
        .await?
        .ok_or(LoginError::InvalidCredentials)?;

    if !password::verify_password(password, &user.password_hash) {
        return Err(LoginError::InvalidCredentials);
    }

    if !user.enabled {
        return Err(LoginError::InvalidCredentials);
    }

    let token = token::create_token(&Claims::new(&user.username, ttl), secret)?;

    tracing::info!(username = %user.username, "issued login token");
    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::token::{default_ttl, validate_token};
    use crate::store::memory::MemUserStore;

    const SECRET: &str = "test-secret-key-at-least-32-bytes-long";

    fn alice() -> NewAccount {
        NewAccount {
            username: "alice".to_string(),
            email: "a@x.com".to_string(),
            password: "secret1".to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_stores_hashed_credentials() {
        let store = MemUserStore::new();

        let user = register(&store, alice()).await.unwrap();

        assert_eq!(user.username, "alice");
        assert_eq!(user.role, Role::User);
        assert!(user.enabled);
        assert_ne!(user.password_hash, "secret1");
        assert!(user.password_hash.starts_with("$argon2id$"));
    }

    #[tokio::test]
    async fn test_register_rejects_duplicate_username() {
        let store = MemUserStore::new();
        register(&store, alice()).await.unwrap();

        let result = register(
            &store,
            NewAccount {
                username: "alice".to_string(),
                email: "b@y.com".to_string(),
                password: "secret2".to_string(),
            },
        )
        .await;

        assert!(matches!(result, Err(RegisterError::DuplicateUsername)));
    }

    #[tokio::test]
    async fn test_register_rejects_duplicate_email() {
        let store = MemUserStore::new();
        register(&store, alice()).await.unwrap();

        let result = register(
            &store,
            NewAccount {
                username: "bob".to_string(),
                email: "a@x.com".to_string(),
                password: "secret2".to_string(),
            },
        )
        .await;

        assert!(matches!(result, Err(RegisterError::DuplicateEmail)));
    }

    #[tokio::test]
    async fn test_login_issues_token_for_subject() {
        let store = MemUserStore::new();
        register(&store, alice()).await.unwrap();

        let token = login(&store, "alice", "secret1", SECRET, default_ttl())
            .await
            .unwrap();

        let claims = validate_token(&token, SECRET).unwrap();
        assert_eq!(claims.sub, "alice");
    }

    #[tokio::test]
    async fn test_login_failure_causes_are_indistinguishable() {
        let store = MemUserStore::new();
        register(&store, alice()).await.unwrap();

        let wrong_password = login(&store, "alice", "wrongpass", SECRET, default_ttl()).await;
        let unknown_user = login(&store, "nobody", "secret1", SECRET, default_ttl()).await;

        assert!(matches!(wrong_password, Err(LoginError::InvalidCredentials)));
        assert!(matches!(unknown_user, Err(LoginError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_disabled_account_cannot_login() {
        let store = MemUserStore::new();
        let hash = password::hash_password("secret1").unwrap();
        store
            .create(CreateUser {
                username: "carol".to_string(),
                email: "c@x.com".to_string(),
                password_hash: hash,
                role: Role::User,
                enabled: false,
            })
            .await
            .unwrap();

        let result = login(&store, "carol", "secret1", SECRET, default_ttl()).await;
        assert!(matches!(result, Err(LoginError::InvalidCredentials)));
    }
}
