use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use futures::future::try_join_all;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::error::{Result, TaskwireError};
use crate::gateway::{Gateway, Operation};
use crate::models::{CreateProject, Project, ProjectOverview};
use crate::progress::{Progress, compute_progress};

/// Authoritative local copy of all projects, each annotated with derived
/// progress.
///
/// Refreshes replace the whole sequence atomically; observers never see a
/// partial mix of old and new projects. Newly created projects are prepended
/// locally for immediate visibility before the next refresh.
///
/// # Thread Safety
///
/// State lives behind an `RwLock` that is never held across a network call,
/// so reads stay cheap while a refresh is in flight.
pub struct ProjectStore {
    gateway: Arc<dyn Gateway>,
    state: RwLock<ProjectState>,
    /// Issuance counter for last-issued-wins refresh resolution.
    refresh_seq: AtomicU64,
}

#[derive(Default)]
struct ProjectState {
    projects: Vec<ProjectOverview>,
    loading: bool,
    last_failure: Option<TaskwireError>,
    applied_seq: u64,
}

impl ProjectState {
    fn record_failure(&mut self, err: &TaskwireError) {
        self.last_failure = Some(err.clone());
    }

    /// A successful call clears the recorded failure only if it is of the
    /// same operation kind, so an unrelated success does not hide it.
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

impl ProjectStore {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self {
            gateway,
            state: RwLock::new(ProjectState::default()),
            refresh_seq: AtomicU64::new(0),
        }
    }

    /// Current snapshot of the enriched project sequence.
    pub async fn snapshot(&self) -> Vec<ProjectOverview> {
        self.state.read().await.projects.clone()
    }

    pub async fn is_loading(&self) -> bool {
        self.state.read().await.loading
    }

    /// The most recent failure, retained until the next successful call of
    /// the same operation kind.
    pub async fn last_error(&self) -> Option<TaskwireError> {
        self.state.read().await.last_failure.clone()
    }

    /// Re-fetch every project and its tasks, replacing the local sequence.
    ///
    /// Each call takes a sequence number at issuance. If a newer refresh has
    /// already been applied by the time this one's responses arrive, the
    /// stale result is discarded (last-issued-wins). On failure the previous
    /// sequence is retained and the failure recorded.
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

        let fetched = self.fetch_overviews().await;

        let mut state = self.state.write().await;
        if seq <= state.applied_seq {
            debug!(seq, applied = state.applied_seq, "discarding stale project refresh");
            return Ok(());
        }
        state.applied_seq = seq;
        // Stay in loading if an even newer refresh is still in flight.
        state.loading = self.refresh_seq.load(Ordering::SeqCst) != seq;

        match fetched {
            Ok(overviews) => {
                debug!(seq, count = overviews.len(), "applied project refresh");
                state.projects = overviews;
                state.clear_failure_for(&[Operation::ListProjects, Operation::ListTasks]);
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "project refresh failed");
                state.record_failure(&err);
                Err(err)
            }
        }
    }

    /// Fetch all projects, then each project's tasks concurrently, and
    /// derive progress for each. Result order follows the server's project
    /// listing order.
    async fn fetch_overviews(&self) -> Result<Vec<ProjectOverview>> {
        let projects = self.gateway.list_projects().await?;
        try_join_all(projects.into_iter().map(|project| {
            let gateway = Arc::clone(&self.gateway);
            async move {
                let tasks = gateway.list_tasks(project.id).await?;
                Ok::<ProjectOverview, TaskwireError>(ProjectOverview {
                    progress: compute_progress(&tasks),
                    project,
                })
            }
        }))
        .await
    }

    /// Create a project and prepend it locally with zero progress, making it
    /// visible immediately; the next refresh reconciles with the server.
    ///
    /// Both fields must be non-empty after trimming; validation failures are
    /// reported without issuing a network call. A gateway failure leaves the
    /// local sequence untouched.
    pub async fn create(&self, title: &str, description: &str) -> Result<Project> {
        let title = title.trim();
        let description = description.trim();
        if title.is_empty() || description.is_empty() {
            let err = TaskwireError::Validation {
                operation: Operation::CreateProject,
                message: "title and description are both required".to_string(),
            };
            self.state.write().await.record_failure(&err);
            return Err(err);
        }

        let draft = CreateProject {
            title: title.to_string(),
            description: description.to_string(),
        };
        match self.gateway.create_project(&draft).await {
            Ok(project) => {
                debug!(id = project.id, "created project, prepending locally");
                let mut state = self.state.write().await;
                state.clear_failure_for(&[Operation::CreateProject]);
                state.projects.insert(
                    0,
                    ProjectOverview {
                        project: project.clone(),
                        progress: Progress::default(),
                    },
                );
                Ok(project)
            }
            Err(err) => {
                warn!(error = %err, "create project failed");
                self.state.write().await.record_failure(&err);
                Err(err)
            }
        }
    }
}
