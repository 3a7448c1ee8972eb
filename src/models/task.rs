use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A task as returned by the remote service.
///
/// Ids are unique within the owning project. Due dates are calendar dates
/// with no time component; the wire uses the `dueDate` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "dueDate")]
    pub due_date: Option<NaiveDate>,
    pub completed: bool,
}

/// Input for creating a task. New tasks always start incomplete, so there is
/// deliberately no completed field here.
#[derive(Debug, Clone, Default)]
pub struct CreateTask {
    pub title: String,
    pub description: String,
    pub due_date: Option<NaiveDate>,
}
