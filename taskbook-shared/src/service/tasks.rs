/// Task ownership service
///
/// Every operation takes the current principal explicitly and enforces the
/// ownership invariant: only the owning user may read or mutate a task.
/// Lookup and ownership failures are distinct, typed outcomes checked by
/// the caller rather than thrown across boundaries: `NotFound` when the id
/// matches nothing, `Forbidden` when it matches someone else's task.
///
/// Field validation at the HTTP boundary is a collaborator's concern, but
/// the service re-checks the entity invariants (title non-empty and at most
/// 50 chars, description at most 250) so no caller can persist a violating
/// row.

use uuid::Uuid;

use crate::models::task::{CreateTask, Task, UpdateTask, DESCRIPTION_MAX_LEN, TITLE_MAX_LEN};
use crate::models::user::User;
use crate::store::{StoreError, TaskStore};

/// Error type for task operations
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    /// No task with the given id exists
    #[error("task not found")]
    NotFound,

    /// The task exists but belongs to a different user
    #[error("task belongs to another user")]
    Forbidden,

    /// Input violates an entity invariant
    #[error("invalid {field}: {message}")]
    InvalidField {
        field: &'static str,
        message: &'static str,
    },

    /// The task store failed
    #[error(transparent)]
    Store(#[from] StoreError),
}

fn check_title(title: &str) -> Result<(), TaskError> {
    if title.trim().is_empty() {
        return Err(TaskError::InvalidField {
            field: "title",
            message: "must not be empty",
        });
    }
    if title.chars().count() > TITLE_MAX_LEN {
        return Err(TaskError::InvalidField {
            field: "title",
            message: "must be at most 50 characters",
        });
    }
    Ok(())
}

fn check_description(description: &str) -> Result<(), TaskError> {
    if description.chars().count() > DESCRIPTION_MAX_LEN {
        return Err(TaskError::InvalidField {
            field: "description",
            message: "must be at most 250 characters",
        });
    }
    Ok(())
}

/// Loads a task and verifies the principal owns it
async fn load_owned(
    tasks: &dyn TaskStore,
    principal: &User,
    task_id: Uuid,
) -> Result<Task, TaskError> {
    let task = tasks.get_by_id(task_id).await?.ok_or(TaskError::NotFound)?;

    if task.owner_id != principal.id {
        tracing::debug!(
            task_id = %task_id,
            owner_id = %task.owner_id,
            principal_id = %principal.id,
            "denied access to task owned by another user"
        );
        return Err(TaskError::Forbidden);
    }

    Ok(task)
}

/// Lists all tasks owned by the principal
pub async fn list_tasks(tasks: &dyn TaskStore, principal: &User) -> Result<Vec<Task>, TaskError> {
    Ok(tasks.list_by_owner(principal.id).await?)
}

/// Creates a task owned by the principal
///
/// The new task starts with status `Todo`.
pub async fn create_task(
    tasks: &dyn TaskStore,
    principal: &User,
    data: CreateTask,
) -> Result<Task, TaskError> {
    check_title(&data.title)?;
    check_description(&data.description)?;

    Ok(tasks.create(principal.id, data).await?)
}

/// Applies a partial update to a task the principal owns
///
/// Present patch fields overwrite the stored values; absent fields are left
/// untouched. Status is free-form: any value may be set regardless of the
/// current one.
///
/// # Errors
///
/// - [`TaskError::NotFound`] if no task has the given id
/// - [`TaskError::Forbidden`] if the task belongs to another user
/// - [`TaskError::InvalidField`] if a patched field violates an invariant
pub async fn update_task(
    tasks: &dyn TaskStore,
    principal: &User,
    task_id: Uuid,
    patch: UpdateTask,
) -> Result<Task, TaskError> {
    if let Some(title) = &patch.title {
        check_title(title)?;
    }
    if let Some(description) = &patch.description {
        check_description(description)?;
    }

    let mut task = load_owned(tasks, principal, task_id).await?;
    patch.apply_to(&mut task);

    Ok(tasks.save(&task).await?)
}

/// Permanently removes a task the principal owns
///
/// Fails with the same `NotFound`/`Forbidden` outcomes as update.
pub async fn delete_task(
    tasks: &dyn TaskStore,
    principal: &User,
    task_id: Uuid,
) -> Result<(), TaskError> {
    let task = load_owned(tasks, principal, task_id).await?;

    tasks.delete_by_id(task.id).await?;
    Ok(())
}
