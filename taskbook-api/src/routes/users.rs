/// User endpoints
///
/// # Endpoints
///
/// - `GET /users/me` - The current principal's profile
/// - `GET /users` - All user summaries
/// - `GET /users/:id` - One user summary
///
/// All three require a bearer token. Listing is open to any authenticated
/// caller, with no role check; summaries never include credential fields.

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use taskbook_shared::models::user::{Role, User};

use crate::{
    app::{AppState, Principal},
    error::{ApiError, ApiResult},
};

/// Public view of a user account
#[derive(Debug, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub role: Role,
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role,
        }
    }
}

/// Current principal's profile
pub async fn me(Extension(Principal(user)): Extension<Principal>) -> Json<UserSummary> {
    Json(user.into())
}

/// Lists all users
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<UserSummary>>> {
    let users = state.users.list().await?;

    Ok(Json(users.into_iter().map(UserSummary::from).collect()))
}

/// Gets a single user by id
///
/// # Errors
///
/// - `404 Not Found`: no user with that id
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<UserSummary>> {
    let user = state
        .users
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(user.into()))
}
