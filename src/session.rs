//! Explicit session context for the authenticated caller.
//!
//! The engine only forwards the bearer credential it is given; acquiring and
//! renewing it belongs to the login collaborator. Persistence follows the
//! on-disk JSON convention (~/.taskwire/session.json) so a restarted client
//! can resume without re-authenticating.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    token: String,
    email: Option<String>,
}

impl Session {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            email: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Get the session file path (~/.taskwire/session.json)
    fn session_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".taskwire").join("session.json"))
    }

    /// Load a persisted session, returning None if absent or unreadable.
    pub fn load() -> Option<Self> {
        Self::session_path().and_then(|path| Self::load_from(&path))
    }

    fn load_from(path: &Path) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        serde_json::from_str(&contents).ok()
    }

    /// Persist the session to disk.
    pub fn save(&self) -> Result<(), String> {
        let path = Self::session_path()
            .ok_or_else(|| "Could not determine home directory".to_string())?;
        self.save_to(&path)
    }

    fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create session directory: {}", e))?;
        }

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize session: {}", e))?;

        std::fs::write(path, contents).map_err(|e| format!("Failed to write session: {}", e))
    }

    /// Remove any persisted session (logout). Missing files are not an error.
    pub fn clear() {
        if let Some(path) = Self::session_path() {
            let _ = std::fs::remove_file(path);
        }
    }
}
