//! Logged-in user session
//!
//! A [`Session`] is loaded once by the [`SessionStore`] and handed by
//! reference to whatever needs to make an authenticated call.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Failed to read session file {0}: {1}")]
    Read(String, String),
    #[error("Failed to write session file {0}: {1}")]
    Write(String, String),
    #[error("Session file {0} is corrupt: {1}")]
    Corrupt(String, String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: i64,
    pub token: String,
}

impl Session {
    pub fn new(user_id: i64, token: impl Into<String>) -> Self {
        Self {
            user_id,
            token: token.into(),
        }
    }

    /// Value for the `Authorization` header
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

/// Owns loading, saving and clearing the session file
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the saved session, `None` when nobody is logged in
    pub fn load(&self) -> Result<Option<Session>, SessionError> {
        if !self.path.exists() {
            debug!("No session file at {}", self.path.display());
            return Ok(None);
        }

        let raw = std::fs::read_to_string(&self.path)
            .map_err(|e| SessionError::Read(self.path.display().to_string(), e.to_string()))?;
        let session = serde_json::from_str::<Session>(&raw)
            .map_err(|e| SessionError::Corrupt(self.path.display().to_string(), e.to_string()))?;

        Ok(Some(session))
    }

    pub fn save(&self, session: &Session) -> Result<(), SessionError> {
        let raw = serde_json::to_string_pretty(session)
            .map_err(|e| SessionError::Write(self.path.display().to_string(), e.to_string()))?;
        std::fs::write(&self.path, raw)
            .map_err(|e| SessionError::Write(self.path.display().to_string(), e.to_string()))
    }

    /// Forget the session. Clearing an absent session is not an error.
    pub fn clear(&self) -> Result<(), SessionError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SessionError::Write(
                self.path.display().to_string(),
                e.to_string(),
            )),
        }
    }
}
