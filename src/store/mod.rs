//! Authoritative local collections, kept consistent by refresh-after-write.
//!
//! Both stores follow the same discipline: every confirmed mutation is
//! followed by an unconditional full re-fetch of the affected collection,
//! trading request volume for the guarantee that the local view never
//! silently diverges from the server. Overlapping refreshes resolve
//! last-issued-wins by sequence number.

mod project_store;
mod task_store;

pub use project_store::ProjectStore;
pub use task_store::TaskStore;

#[cfg(test)]
mod testing;
