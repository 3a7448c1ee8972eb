//! Presentation projection over the authoritative task collection.
//!
//! The projector derives a new sequence on every call; it never reorders or
//! filters the collection it is given and holds no state between calls.

use crate::models::Task;

/// Sort orders for the task view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Preserve the filtered subsequence's relative order.
    #[default]
    Default,
    /// Ascending by due date; tasks without one sort first.
    Due,
    /// Incomplete tasks before completed ones.
    Completed,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Default => "default",
            SortKey::Due => "due",
            SortKey::Completed => "completed",
        }
    }
}

impl std::str::FromStr for SortKey {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "default" => Ok(SortKey::Default),
            "due" => Ok(SortKey::Due),
            "completed" => Ok(SortKey::Completed),
            _ => Err(()),
        }
    }
}

/// Derive the presentation sequence: case-insensitive substring filter on
/// title only, then an optional stable sort. Both sorts preserve the prior
/// relative order of equal keys.
pub fn project_view(tasks: &[Task], search: &str, sort: SortKey) -> Vec<Task> {
    let needle = search.to_lowercase();
    let mut view: Vec<Task> = tasks
        .iter()
        .filter(|t| needle.is_empty() || t.title.to_lowercase().contains(&needle))
        .cloned()
        .collect();

    match sort {
        SortKey::Default => {}
        // Option<NaiveDate> orders None before any Some, which is exactly
        // the missing-due-date-first rule. sort_by_key is stable.
        SortKey::Due => view.sort_by_key(|t| t.due_date),
        SortKey::Completed => view.sort_by_key(|t| t.completed),
    }

    view
}
