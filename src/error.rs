use thiserror::Error;

use crate::gateway::Operation;

/// Failure taxonomy for the engine.
///
/// Every expected failure path resolves to one of these kinds; the gateway
/// classifies transport outcomes and the stores propagate them unchanged.
/// Variants are cheap to clone so a store can both record the last failure
/// and return it to the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaskwireError {
    #[error("Invalid input for {operation}: {message}")]
    Validation { operation: Operation, message: String },

    #[error("No response from server during {operation}: {message}")]
    Transport { operation: Operation, message: String },

    #[error("Server returned status {status} for {operation}")]
    Remote { operation: Operation, status: u16 },

    #[error("Malformed response body for {operation}: {message}")]
    Decode { operation: Operation, message: String },
}

impl TaskwireError {
    /// The remote verb (or the verb being validated) that produced this failure.
    pub fn operation(&self) -> Operation {
        match self {
            TaskwireError::Validation { operation, .. }
            | TaskwireError::Transport { operation, .. }
            | TaskwireError::Remote { operation, .. }
            | TaskwireError::Decode { operation, .. } => *operation,
        }
    }

    /// True when the server rejected the bearer credential. The session
    /// collaborator reacts to this (e.g. by redirecting to re-authentication);
    /// the engine itself never retries.
    pub fn is_auth(&self) -> bool {
        matches!(
            self,
            TaskwireError::Remote {
                status: 401 | 403,
                ..
            }
        )
    }
}

pub type Result<T> = std::result::Result<T, TaskwireError>;
