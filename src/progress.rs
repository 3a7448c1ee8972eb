//! Completion progress derived from a task collection.

use serde::Serialize;

use crate::models::Task;

/// Completion counts plus a rounded percentage in [0, 100].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
    pub percentage: u8,
}

/// Compute completion progress for a task collection.
///
/// The percentage is `completed / total * 100` rounded to the nearest
/// integer, and 0 for an empty collection. Pure and deterministic: no I/O,
/// same output for the same input sequence.
pub fn compute_progress(tasks: &[Task]) -> Progress {
    let total = tasks.len();
    let completed = tasks.iter().filter(|t| t.completed).count();
    let percentage = if total == 0 {
        0
    } else {
        ((completed as f64 / total as f64) * 100.0).round() as u8
    };

    Progress {
        completed,
        total,
        percentage,
    }
}
