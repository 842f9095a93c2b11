/// Postgres store backends
///
/// sqlx-backed implementations of the repository traits. The schema lives
/// in the crate's `migrations/` directory and is applied by
/// [`crate::db::migrations::run_migrations`]. Role, priority, and status
/// are Postgres enum types bound through the models' `sqlx::Type` derives.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{
    task::{CreateTask, Task},
    user::{CreateUser, User},
};
use crate::store::{StoreError, TaskStore, UserStore};

const USER_COLUMNS: &str = "id, username, email, password_hash, role, enabled, created_at";
const TASK_COLUMNS: &str =
    "id, owner_id, title, description, priority, status, due_date, created_at, updated_at";

/// Postgres-backed [`UserStore`]
#[derive(Debug, Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn create(&self, data: CreateUser) -> Result<User, StoreError> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (username, email, password_hash, role, enabled)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {USER_COLUMNS}
            "#,
        ))
        .bind(data.username)
        .bind(data.email)
        .bind(data.password_hash)
        .bind(data.role)
        .bind(data.enabled)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1",
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1",
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1",
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn list(&self) -> Result<Vec<User>, StoreError> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at, id",
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }
}

/// Postgres-backed [`TaskStore`]
#[derive(Debug, Clone)]
pub struct PgTaskStore {
    pool: PgPool,
}

impl PgTaskStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskStore for PgTaskStore {
    async fn create(&self, owner_id: Uuid, data: CreateTask) -> Result<Task, StoreError> {
        // status falls back to the column default ('TODO')
        let task = sqlx::query_as::<_, Task>(&format!(
            r#"
            INSERT INTO tasks (owner_id, title, description, priority, due_date)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {TASK_COLUMNS}
            "#,
        ))
        .bind(owner_id)
        .bind(data.title)
        .bind(data.description)
        .bind(data.priority)
        .bind(data.due_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(task)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Task>, StoreError> {
        let task = sqlx::query_as::<_, Task>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE id = $1",
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(task)
    }

    async fn save(&self, task: &Task) -> Result<Task, StoreError> {
        let saved = sqlx::query_as::<_, Task>(&format!(
            r#"
            UPDATE tasks
            SET title = $2, description = $3, priority = $4, status = $5,
                due_date = $6, updated_at = NOW()
            WHERE id = $1
            RETURNING {TASK_COLUMNS}
            "#,
        ))
        .bind(task.id)
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.priority)
        .bind(task.status)
        .bind(task.due_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(saved)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Task>, StoreError> {
        let tasks = sqlx::query_as::<_, Task>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE owner_id = $1 ORDER BY created_at, id",
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(tasks)
    }
}
