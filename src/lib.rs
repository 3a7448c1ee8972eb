//! Taskwire - client-side sync and derived-state engine for a remote
//! project/task tracker.
//!
//! The remote service owns the data; this crate owns the client's view of
//! it. Stores hold refresh-consistent snapshots of projects and tasks, every
//! confirmed mutation resynchronizes by re-fetching the affected collection,
//! and completion progress plus the filtered/sorted task view are derived as
//! pure functions over the latest snapshot.

pub mod error;
pub mod gateway;
pub mod models;
pub mod progress;
pub mod session;
pub mod store;
pub mod view;

pub use error::{Result, TaskwireError};
pub use gateway::{Gateway, HttpGateway, Operation};
pub use models::{CreateProject, CreateTask, Project, ProjectOverview, Task};
pub use progress::{Progress, compute_progress};
pub use session::Session;
pub use store::{ProjectStore, TaskStore};
pub use view::{SortKey, project_view};
