/// Task endpoints
///
/// # Endpoints
///
/// - `GET /tasks` - List the caller's tasks
/// - `POST /tasks` - Create a task (status starts as `TODO`)
/// - `PUT /tasks/:id` - Partial update; absent fields are left untouched
/// - `DELETE /tasks/:id` - Remove a task permanently
///
/// All endpoints require a bearer token and operate only on tasks owned by
/// the resolved principal; other users' tasks answer `403`. Due dates
/// travel as calendar dates (`dueDate: "2030-06-01"`) and are stored at
/// midnight UTC.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use taskbook_shared::models::task::{due_instant, CreateTask, Priority, Status, Task, UpdateTask};
use taskbook_shared::service::tasks;

use crate::{
    app::{AppState, Principal},
    error::ApiResult,
};

/// Create request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    #[validate(length(min = 1, max = 50, message = "Title must be 1 to 50 characters"))]
    pub title: String,

    #[serde(default)]
    #[validate(length(max = 250, message = "Description must be at most 250 characters"))]
    pub description: String,

    pub priority: Priority,

    /// Calendar date the task is due, if any
    pub due_date: Option<NaiveDate>,
}

/// Partial update request
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    #[validate(length(min = 1, max = 50, message = "Title must be 1 to 50 characters"))]
    pub title: Option<String>,

    #[validate(length(max = 250, message = "Description must be at most 250 characters"))]
    pub description: Option<String>,

    pub priority: Option<Priority>,

    pub status: Option<Status>,

    pub due_date: Option<NaiveDate>,
}

/// Task response body
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub status: Status,
    pub due_date: Option<DateTime<Utc>>,
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            title: task.title,
            description: task.description,
            priority: task.priority,
            status: task.status,
            due_date: task.due_date,
        }
    }
}

/// Lists the caller's tasks
pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(Principal(user)): Extension<Principal>,
) -> ApiResult<Json<Vec<TaskResponse>>> {
    let tasks = tasks::list_tasks(state.tasks.as_ref(), &user).await?;

    Ok(Json(tasks.into_iter().map(TaskResponse::from).collect()))
}

/// Creates a task owned by the caller
///
/// # Errors
///
/// - `422 Unprocessable Entity`: validation failed
pub async fn create_task(
    State(state): State<AppState>,
    Extension(Principal(user)): Extension<Principal>,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<TaskResponse>)> {
    req.validate()?;

    let task = tasks::create_task(
        state.tasks.as_ref(),
        &user,
        CreateTask {
            title: req.title,
            description: req.description,
            priority: req.priority,
            due_date: req.due_date.map(due_instant),
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(task.into())))
}

/// Applies a partial update to one of the caller's tasks
///
/// # Errors
///
/// - `422 Unprocessable Entity`: validation failed
/// - `404 Not Found`: no task with that id
/// - `403 Forbidden`: the task belongs to another user
pub async fn update_task(
    State(state): State<AppState>,
    Extension(Principal(user)): Extension<Principal>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateTaskRequest>,
) -> ApiResult<Json<TaskResponse>> {
    req.validate()?;

    let task = tasks::update_task(
        state.tasks.as_ref(),
        &user,
        id,
        UpdateTask {
            title: req.title,
            description: req.description,
            priority: req.priority,
            status: req.status,
            due_date: req.due_date.map(due_instant),
        },
    )
    .await?;

    Ok(Json(task.into()))
}

/// Deletes one of the caller's tasks
///
/// # Errors
///
/// - `404 Not Found`: no task with that id
/// - `403 Forbidden`: the task belongs to another user
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(Principal(user)): Extension<Principal>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    tasks::delete_task(state.tasks.as_ref(), &user, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
