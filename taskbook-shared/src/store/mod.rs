/// Persistence interfaces
///
/// The services never talk to a database directly. They go through the
/// repository traits below, which expose the handful of operations the
/// domain needs and nothing engine-specific. Owner relationships are plain
/// foreign-key ids resolved explicitly, never lazily materialized.
///
/// # Backends
///
/// - [`postgres`]: sqlx-backed stores for production
/// - [`memory`]: HashMap-backed stores for tests and local runs
///
/// Every mutating operation is a single unit of work touching one entity;
/// no multi-entity transactions are needed by this domain.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{
    task::{CreateTask, Task},
    user::{CreateUser, User},
};

/// Error type for store operations
///
/// Store failures are infrastructure faults (connectivity, constraint
/// surprises), not domain outcomes. "Row not found" is modeled as
/// `Ok(None)` on lookups, never as an error.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backend failed to execute the operation
    #[error("store backend error: {0}")]
    Backend(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Backend(err.to_string())
    }
}

/// Persistence for user records
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Inserts a new user and returns it with its server-assigned id
    async fn create(&self, data: CreateUser) -> Result<User, StoreError>;

    /// Looks up a user by id
    async fn get_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    /// Looks up a user by username
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    /// Looks up a user by email
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Lists all users
    async fn list(&self) -> Result<Vec<User>, StoreError>;
}

/// Persistence for task records
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Inserts a new task for the given owner and returns it with its
    /// server-assigned id, default status, and timestamps
    async fn create(&self, owner_id: Uuid, data: CreateTask) -> Result<Task, StoreError>;

    /// Looks up a task by id
    async fn get_by_id(&self, id: Uuid) -> Result<Option<Task>, StoreError>;

    /// Persists the mutable fields of an existing task and returns the
    /// stored row (with a fresh `updated_at`)
    async fn save(&self, task: &Task) -> Result<Task, StoreError>;

    /// Removes a task permanently; returns whether a row existed
    async fn delete_by_id(&self, id: Uuid) -> Result<bool, StoreError>;

    /// Lists all tasks owned by the given user
    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Task>, StoreError>;
}
