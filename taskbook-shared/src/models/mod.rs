/// Data models for Taskbook
///
/// This module contains the persistent data types and their input structs.
///
/// # Models
///
/// - `user`: User accounts (identity, role, enabled flag)
/// - `task`: To-do items owned by exactly one user
///
/// # Example
///
/// ```
/// use taskbook_shared::models::task::{CreateTask, Priority, Status};
///
/// let input = CreateTask {
///     title: "Buy milk".to_string(),
///     description: String::new(),
///     priority: Priority::Low,
///     due_date: None,
/// };
/// assert_eq!(input.priority, Priority::Low);
/// ```

pub mod task;
pub mod user;
