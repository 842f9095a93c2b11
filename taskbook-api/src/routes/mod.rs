/// API route handlers
///
/// Organized by resource:
///
/// - `health`: Liveness endpoint
/// - `auth`: Registration and login
/// - `users`: User summaries and the current principal's profile
/// - `tasks`: Owner-scoped task CRUD

pub mod auth;
pub mod health;
pub mod tasks;
pub mod users;
