//! Typed boundary over the remote CRUD surface.
//!
//! The [`Gateway`] trait has one method per remote verb. Implementations
//! translate transport responses into entities or typed failures; they
//! perform no retries, no caching, and never touch store state.

mod http;

pub use http::HttpGateway;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{CreateProject, CreateTask, Project, Task};

/// The remote verbs the engine can issue. Attached to every failure so
/// callers can tell which call produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    ListProjects,
    CreateProject,
    ListTasks,
    CreateTask,
    CompleteTask,
    EditTask,
    DeleteTask,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::ListProjects => "list projects",
            Operation::CreateProject => "create project",
            Operation::ListTasks => "list tasks",
            Operation::CreateTask => "create task",
            Operation::CompleteTask => "complete task",
            Operation::EditTask => "edit task",
            Operation::DeleteTask => "delete task",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Abstract interface over the remote CRUD surface.
///
/// Stores hold this as a trait object so tests can substitute an in-memory
/// implementation.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Fetch all projects visible to the authenticated caller.
    async fn list_projects(&self) -> Result<Vec<Project>>;

    /// Create a project and return the canonical record with its assigned id.
    async fn create_project(&self, draft: &CreateProject) -> Result<Project>;

    /// Fetch all tasks belonging to a project.
    async fn list_tasks(&self, project_id: i64) -> Result<Vec<Task>>;

    /// Create a task in a project. Created tasks always start incomplete.
    async fn create_task(&self, project_id: i64, draft: &CreateTask) -> Result<Task>;

    /// Mark a task completed. Completing an already-completed task is not an
    /// error; the server treats the call as idempotent.
    async fn complete_task(&self, project_id: i64, task_id: i64) -> Result<()>;

    /// Full-record update of a task's mutable fields.
    async fn edit_task(&self, project_id: i64, task: &Task) -> Result<Task>;

    /// Remove a task from the remote store.
    async fn delete_task(&self, project_id: i64, task_id: i64) -> Result<()>;
}
