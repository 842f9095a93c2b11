/// Error handling for the API server
///
/// A unified error type that maps to HTTP responses. Handlers return
/// `Result<T, ApiError>`; the `IntoResponse` impl turns each variant into
/// the right status code with a JSON body. Internal faults are logged and
/// surfaced generically; no stack traces or backend detail reach clients.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;

use taskbook_shared::auth::password::PasswordError;
use taskbook_shared::auth::principal::PrincipalError;
use taskbook_shared::service::account::{LoginError, RegisterError};
use taskbook_shared::service::tasks::TaskError;
use taskbook_shared::store::StoreError;

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug)]
pub enum ApiError {
    /// Bad request (400)
    BadRequest(String),

    /// Unauthorized (401) - missing/invalid token or bad credentials
    Unauthorized(String),

    /// Forbidden (403) - valid principal, wrong owner
    Forbidden(String),

    /// Not found (404)
    NotFound(String),

    /// Conflict (409) - duplicate username or email
    Conflict(String),

    /// Unprocessable entity (422) - validation errors
    ValidationError(Vec<ValidationErrorDetail>),

    /// Internal server error (500)
    InternalError(String),
}

/// Validation error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationErrorDetail {
    /// Field that failed validation
    pub field: String,

    /// Error message
    pub message: String,
}

/// Error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code (e.g. "not_found", "conflict")
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Optional validation errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<ValidationErrorDetail>>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ApiError::ValidationError(errors) => {
                write!(f, "Validation failed: {} errors", errors.len())
            }
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message, details) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg, None),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "unauthorized", msg, None),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, "forbidden", msg, None),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg, None),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg, None),
            ApiError::ValidationError(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation_error",
                "Request validation failed".to_string(),
                Some(errors),
            ),
            ApiError::InternalError(msg) => {
                // Log internal errors but don't expose details to clients
                tracing::error!("internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_code.to_string(),
            message,
            details,
        });

        (status, body).into_response()
    }
}

/// Convert request-DTO validation failures to API errors
impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let details: Vec<ValidationErrorDetail> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| ValidationErrorDetail {
                    field: field.to_string(),
                    message: error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| "Validation failed".to_string()),
                })
            })
            .collect();
        ApiError::ValidationError(details)
    }
}

/// Convert store errors to API errors
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::InternalError(format!("store error: {}", err))
    }
}

/// Convert password errors to API errors
impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        ApiError::InternalError(format!("password operation failed: {}", err))
    }
}

/// Convert registration errors to API errors
impl From<RegisterError> for ApiError {
    fn from(err: RegisterError) -> Self {
        match err {
            RegisterError::DuplicateUsername => {
                ApiError::Conflict("Username already exists".to_string())
            }
            RegisterError::DuplicateEmail => ApiError::Conflict("Email already exists".to_string()),
            RegisterError::Hash(e) => e.into(),
            RegisterError::Store(e) => e.into(),
        }
    }
}

/// Convert login errors to API errors
///
/// Invalid credentials stay deliberately generic.
impl From<LoginError> for ApiError {
    fn from(err: LoginError) -> Self {
        match err {
            LoginError::InvalidCredentials => {
                ApiError::Unauthorized("Invalid username or password".to_string())
            }
            LoginError::Token(e) => ApiError::InternalError(format!("token issue failed: {}", e)),
            LoginError::Store(e) => e.into(),
        }
    }
}

/// Convert principal resolution errors to API errors
///
/// A bad token, an unknown subject, and a disabled account all surface the
/// same way; only store faults are treated as server errors.
impl From<PrincipalError> for ApiError {
    fn from(err: PrincipalError) -> Self {
        match err {
            PrincipalError::Store(e) => e.into(),
            _ => ApiError::Unauthorized("Invalid or expired token".to_string()),
        }
    }
}

/// Convert task service errors to API errors
impl From<TaskError> for ApiError {
    fn from(err: TaskError) -> Self {
        match err {
            TaskError::NotFound => ApiError::NotFound("Task not found".to_string()),
            TaskError::Forbidden => {
                ApiError::Forbidden("This task belongs to another user".to_string())
            }
            TaskError::InvalidField { field, message } => {
                ApiError::ValidationError(vec![ValidationErrorDetail {
                    field: field.to_string(),
                    message: message.to_string(),
                }])
            }
            TaskError::Store(e) => e.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ApiError::BadRequest("Invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: Invalid input");

        let err = ApiError::NotFound("Task not found".to_string());
        assert_eq!(err.to_string(), "Not found: Task not found");
    }

    #[test]
    fn test_status_mapping() {
        let cases = [
            (ApiError::BadRequest("x".into()), StatusCode::BAD_REQUEST),
            (ApiError::Unauthorized("x".into()), StatusCode::UNAUTHORIZED),
            (ApiError::Forbidden("x".into()), StatusCode::FORBIDDEN),
            (ApiError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (ApiError::Conflict("x".into()), StatusCode::CONFLICT),
            (
                ApiError::ValidationError(vec![]),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                ApiError::InternalError("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn test_duplicate_errors_are_distinct_conflicts() {
        let username: ApiError = RegisterError::DuplicateUsername.into();
        let email: ApiError = RegisterError::DuplicateEmail.into();

        match (&username, &email) {
            (ApiError::Conflict(u), ApiError::Conflict(e)) => {
                assert!(u.contains("Username"));
                assert!(e.contains("Email"));
            }
            _ => panic!("expected Conflict variants"),
        }
    }

    #[test]
    fn test_ownership_errors_map_to_http() {
        let not_found: ApiError = TaskError::NotFound.into();
        assert_eq!(not_found.into_response().status(), StatusCode::NOT_FOUND);

        let forbidden: ApiError = TaskError::Forbidden.into();
        assert_eq!(forbidden.into_response().status(), StatusCode::FORBIDDEN);
    }
}
