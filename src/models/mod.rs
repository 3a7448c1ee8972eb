pub mod project;
pub mod task;

pub use project::{CreateProject, Project, ProjectOverview};
pub use task::{CreateTask, Task};
