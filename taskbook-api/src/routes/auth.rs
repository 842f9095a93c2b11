/// Authentication endpoints
///
/// # Endpoints
///
/// - `POST /auth/register` - Create a new account (no token is issued)
/// - `POST /auth/login` - Verify credentials and get a bearer token
///
/// Registration answers `201` with an empty body; duplicates come back as
/// `409` with a message naming the conflicting field. Login failures are a
/// generic `401` regardless of whether the username or the password was
/// wrong.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use validator::Validate;

use taskbook_shared::service::account::{self, NewAccount};

use crate::{app::AppState, error::ApiResult};

/// Register request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Login name
    #[validate(length(min = 1, max = 50, message = "Username must be 1 to 50 characters"))]
    pub username: String,

    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username must not be empty"))]
    pub username: String,

    pub password: String,
}

/// Login response
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Bearer token for subsequent requests
    pub token: String,
}

/// Register a new account
///
/// # Errors
///
/// - `422 Unprocessable Entity`: validation failed
/// - `409 Conflict`: username or email already exists
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<StatusCode> {
    req.validate()?;

    account::register(
        state.users.as_ref(),
        NewAccount {
            username: req.username,
            email: req.email,
            password: req.password,
        },
    )
    .await?;

    Ok(StatusCode::CREATED)
}

/// Login and get a bearer token
///
/// # Errors
///
/// - `422 Unprocessable Entity`: validation failed
/// - `401 Unauthorized`: invalid credentials
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    req.validate()?;

    let token = account::login(
        state.users.as_ref(),
        &req.username,
        &req.password,
        state.token_secret(),
        state.config.token_ttl(),
    )
    .await?;

    Ok(Json(LoginResponse { token }))
}
