//! Current user and thread, persisted between runs
//!
//! The session is a plain value handed to whoever needs it. Reading and
//! writing it to disk happens only through [`SessionStore`].

use crate::messages::{ChatThread, User};
use crate::{GenbotError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(default)]
    pub current_user: Option<User>,
    #[serde(default)]
    pub current_thread: Option<ChatThread>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.current_user.is_some()
    }

    /// Switch to `user`, dropping any thread of the previous user
    pub fn login(&mut self, user: User) {
        let same_user = self.current_user.as_ref().is_some_and(|u| u.id == user.id);
        if !same_user {
            self.current_thread = None;
        }
        self.current_user = Some(user);
    }

    pub fn logout(&mut self) {
        self.current_user = None;
        self.current_thread = None;
    }

    pub fn select_thread(&mut self, thread: ChatThread) {
        self.current_thread = Some(thread);
    }

    /// Forget the open thread if it is `thread_id` (after deleting it)
    pub fn forget_thread(&mut self, thread_id: i64) {
        if self.current_thread.as_ref().is_some_and(|t| t.id == thread_id) {
            self.current_thread = None;
        }
    }
}

/// Loads and saves a [`Session`] as JSON
#[derive(Debug, Clone)]
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

    /// Read the saved session; a missing file is an empty session
    pub fn load(&self) -> Result<Session> {
        if !self.path.exists() {
            debug!("No saved session at {:?}", self.path);
            return Ok(Session::default());
        }

        let raw = fs::read_to_string(&self.path)?;
        let session: Session = serde_json::from_str(&raw).map_err(|e| {
            GenbotError::SessionError(format!("malformed session file {:?}: {}", self.path, e))
        })?;

        info!(
            "Restored session for {}",
            session
                .current_user
                .as_ref()
                .map_or("nobody", |u| u.username.as_str())
        );
        Ok(session)
    }

    /// Load the session, starting fresh if the file cannot be used
    pub fn load_or_default(&self) -> Session {
        match self.load() {
            Ok(session) => session,
            Err(e) => {
                warn!("Ignoring saved session: {}", e);
                Session::default()
            }
        }
    }

    pub fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, json)?;
        debug!("Saved session to {:?}", self.path);
        Ok(())
    }

    /// Remove the saved session (logout)
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                info!("Cleared saved session");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
