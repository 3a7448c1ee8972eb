use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::error::{Result, TaskwireError};
use crate::gateway::{Gateway, Operation};
use crate::models::{CreateTask, Task};

/// Authoritative local copy of one project's tasks.
///
/// Scoped to a single project; callers construct a fresh store when the
/// active project changes. Every confirmed mutation triggers an
/// unconditional [`refresh`](TaskStore::refresh) so the local view never
/// silently diverges from the server. A failed mutation never runs the
/// refresh, leaving the previously-good sequence in place.
pub struct TaskStore {
    gateway: Arc<dyn Gateway>,
    project_id: i64,
    state: RwLock<TaskState>,
    /// Issuance counter for last-issued-wins refresh resolution.
    refresh_seq: AtomicU64,
}

#[derive(Default)]
struct TaskState {
    tasks: Vec<Task>,
    loading: bool,
    last_failure: Option<TaskwireError>,
    applied_seq: u64,
}

impl TaskState {
    fn record_failure(&mut self, err: &TaskwireError) {
        self.last_failure = Some(err.clone());
    }

    fn clear_failure_for(&mut self, operations: &[Operation]) {
        if self
            .last_failure
            .as_ref()
            .is_some_and(|e| operations.contains(&e.operation()))
        {
            self.last_failure = None;
        }
    }
}

impl TaskStore {
    pub fn new(gateway: Arc<dyn Gateway>, project_id: i64) -> Self {
        Self {
            gateway,
            project_id,
            state: RwLock::new(TaskState::default()),
            refresh_seq: AtomicU64::new(0),
        }
    }

    pub fn project_id(&self) -> i64 {
        self.project_id
    }

    /// Current snapshot of the task sequence, in server listing order.
    pub async fn snapshot(&self) -> Vec<Task> {
        self.state.read().await.tasks.clone()
    }

    pub async fn is_loading(&self) -> bool {
        self.state.read().await.loading
    }

    /// The most recent failure, retained until the next successful call of
    /// the same operation kind.
    pub async fn last_error(&self) -> Option<TaskwireError> {
        self.state.read().await.last_failure.clone()
    }

    /// Replace the whole local sequence from the server's current listing.
    ///
    /// Last-issued-wins: responses belonging to a refresh older than the
    /// last applied one are discarded. On failure the previous sequence is
    /// retained (stale-but-available) and the failure recorded.
    pub async fn refresh(&self) -> Result<()> {
        let seq = self.refresh_seq.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut state = self.state.write().await;
            // A newer refresh may have fully applied before this one got the
            // lock; a stale refresh must not set loading, since its discard
            // below never clears it.
            if seq > state.applied_seq {
                state.loading = true;
            }
        }

        let fetched = self.gateway.list_tasks(self.project_id).await;

        let mut state = self.state.write().await;
        if seq <= state.applied_seq {
            debug!(seq, applied = state.applied_seq, "discarding stale task refresh");
            return Ok(());
        }
        state.applied_seq = seq;
        // Stay in loading if an even newer refresh is still in flight.
        state.loading = self.refresh_seq.load(Ordering::SeqCst) != seq;

        match fetched {
            Ok(tasks) => {
                debug!(seq, count = tasks.len(), "applied task refresh");
                state.tasks = tasks;
                state.clear_failure_for(&[Operation::ListTasks]);
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "task refresh failed");
                state.record_failure(&err);
                Err(err)
            }
        }
    }

    /// Create a task. The title must be non-empty after trimming; validation
    /// failures are reported without issuing a network call. Created tasks
    /// always start incomplete.
    pub async fn create(&self, draft: CreateTask) -> Result<()> {
        if draft.title.trim().is_empty() {
            let err = TaskwireError::Validation {
                operation: Operation::CreateTask,
                message: "title is required".to_string(),
            };
            self.state.write().await.record_failure(&err);
            return Err(err);
        }

        match self.gateway.create_task(self.project_id, &draft).await {
            Ok(task) => {
                debug!(id = task.id, "created task");
                self.state
                    .write()
                    .await
                    .clear_failure_for(&[Operation::CreateTask]);
                self.refresh().await
            }
            Err(err) => {
                warn!(error = %err, "create task failed");
                self.state.write().await.record_failure(&err);
                Err(err)
            }
        }
    }

    /// Mark a task completed. Completing an already-completed task is not an
    /// error; the server treats the call as idempotent.
    pub async fn complete(&self, task_id: i64) -> Result<()> {
        match self.gateway.complete_task(self.project_id, task_id).await {
            Ok(()) => {
                debug!(task_id, "completed task");
                self.state
                    .write()
                    .await
                    .clear_failure_for(&[Operation::CompleteTask]);
                self.refresh().await
            }
            Err(err) => {
                warn!(error = %err, task_id, "complete task failed");
                self.state.write().await.record_failure(&err);
                Err(err)
            }
        }
    }

    /// Full-record update. All mutable fields (title, description, due date)
    /// must be present in the argument; sparse updates are not supported.
    pub async fn edit(&self, task: &Task) -> Result<()> {
        match self.gateway.edit_task(self.project_id, task).await {
            Ok(_) => {
                debug!(task_id = task.id, "edited task");
                self.state
                    .write()
                    .await
                    .clear_failure_for(&[Operation::EditTask]);
                self.refresh().await
            }
            Err(err) => {
                warn!(error = %err, task_id = task.id, "edit task failed");
                self.state.write().await.record_failure(&err);
                Err(err)
            }
        }
    }

    /// Remove a task. Whatever failure the gateway reports for an unknown id
    /// surfaces to the caller unswallowed.
    pub async fn delete(&self, task_id: i64) -> Result<()> {
        match self.gateway.delete_task(self.project_id, task_id).await {
            Ok(()) => {
                debug!(task_id, "deleted task");
                self.state
                    .write()
                    .await
                    .clear_failure_for(&[Operation::DeleteTask]);
                self.refresh().await
            }
            Err(err) => {
                warn!(error = %err, task_id, "delete task failed");
                self.state.write().await.record_failure(&err);
                Err(err)
            }
        }
    }
}
