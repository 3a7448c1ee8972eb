use serde::{Deserialize, Serialize};

use crate::progress::Progress;

/// A project as returned by the remote service.
///
/// The id is server-assigned and globally unique. Local copies are only ever
/// replaced wholesale by a refresh, never mutated field by field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// Input for creating a project. The server assigns the id.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateProject {
    pub title: String,
    pub description: String,
}

/// A project annotated with progress derived from its task collection.
/// Derived state only: never persisted, never treated as a source of truth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectOverview {
    pub project: Project,
    pub progress: Progress,
}
