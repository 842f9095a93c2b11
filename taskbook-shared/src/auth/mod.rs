/// Authentication primitives for Taskbook
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`token`]: Signed, time-limited bearer tokens (JWT, HS256)
/// - [`principal`]: Per-request token-to-user resolution
///
/// The flow: `service::account::login` verifies credentials with
/// [`password`] and mints a token with [`token`]; every authenticated
/// request then goes through [`principal`] exactly once to turn the bearer
/// token back into a [`crate::models::user::User`], which is passed
/// explicitly into the services. There is no ambient "current user" state.

pub mod password;
pub mod principal;
pub mod token;
