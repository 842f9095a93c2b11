/// In-memory store backends
///
/// HashMap-backed implementations of the repository traits, used by the
/// test suites and for running the server without a database. Semantics
/// mirror the Postgres backend: server-assigned UUID ids, `updated_at`
/// stamped on save, owner-scoped listing.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{
    task::{CreateTask, Status, Task},
    user::{CreateUser, User},
};
use crate::store::{StoreError, TaskStore, UserStore};

/// In-memory [`UserStore`]
#[derive(Debug, Clone, Default)]
pub struct MemUserStore {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl MemUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemUserStore {
    async fn create(&self, data: CreateUser) -> Result<User, StoreError> {
        let user = User {
            id: Uuid::new_v4(),
            username: data.username,
            email: data.email,
            password_hash: data.password_hash,
            role: data.role,
            enabled: data.enabled,
            created_at: Utc::now(),
        };

        self.users.write().await.insert(user.id, user.clone());
        Ok(user)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<User>, StoreError> {
        let mut users: Vec<User> = self.users.read().await.values().cloned().collect();
        users.sort_by_key(|u| (u.created_at, u.id));
        Ok(users)
    }
}

/// In-memory [`TaskStore`]
#[derive(Debug, Clone, Default)]
pub struct MemTaskStore {
    tasks: Arc<RwLock<HashMap<Uuid, Task>>>,
}

impl MemTaskStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskStore for MemTaskStore {
    async fn create(&self, owner_id: Uuid, data: CreateTask) -> Result<Task, StoreError> {
        let now = Utc::now();
        let task = Task {
            id: Uuid::new_v4(),
            owner_id,
            title: data.title,
            description: data.description,
            priority: data.priority,
            status: Status::Todo,
            due_date: data.due_date,
            created_at: now,
            updated_at: now,
        };

        self.tasks.write().await.insert(task.id, task.clone());
        Ok(task)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Task>, StoreError> {
        Ok(self.tasks.read().await.get(&id).cloned())
    }

    async fn save(&self, task: &Task) -> Result<Task, StoreError> {
        let mut saved = task.clone();
        saved.updated_at = Utc::now();
        self.tasks.write().await.insert(saved.id, saved.clone());
        Ok(saved)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, StoreError> {
        Ok(self.tasks.write().await.remove(&id).is_some())
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Task>, StoreError> {
        let mut tasks: Vec<Task> = self
            .tasks
            .read()
            .await
            .values()
            .filter(|t| t.owner_id == owner_id)
            .cloned()
            .collect();
        tasks.sort_by_key(|t| (t.created_at, t.id));
        Ok(tasks)
    }
}
