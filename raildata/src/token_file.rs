//! On-disk persistence for the API token.
//!
//! NJ Transit issues only a handful of tokens per day, so a process that
//! restarts often should reuse the last token instead of logging in again.

use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::error::{RailDataError, Result};
use crate::token::TokenUpdate;

/// Held across the read and write of every listener update in this process.
static WRITE_LOCK: Mutex<()> = Mutex::new(());

#[derive(Debug, Serialize, Deserialize)]
struct StoredToken {
    token: String,
    /// Unix timestamp of the write.
    saved_at_secs: i64,
}

/// A JSON file holding the most recent token.
#[derive(Debug, Clone)]
pub struct TokenFile {
    path: PathBuf,
}

impl TokenFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored token.
    ///
    /// Returns `None` if the file doesn't exist, can't be parsed, or holds an
    /// empty token.
    pub fn load(&self) -> Option<String> {
        let contents = std::fs::read_to_string(&self.path).ok()?;
        let stored: StoredToken = serde_json::from_str(&contents).ok()?;
        let token = stored.token.trim();
        (!token.is_empty()).then(|| token.to_string())
    }

    /// Write `token`, creating parent directories if needed.
    ///
    /// The file is replaced atomically, so readers see either the old token
    /// or the new one.
    pub fn save(&self, token: &str) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        if !dir.exists() {
            std::fs::create_dir_all(dir).map_err(|e| RailDataError::TokenFile {
                message: format!("failed to create directory {}: {e}", dir.display()),
            })?;
        }

        let stored = StoredToken {
            token: token.to_string(),
            saved_at_secs: Utc::now().timestamp(),
        };
        let json = serde_json::to_string_pretty(&stored).map_err(|e| RailDataError::TokenFile {
            message: format!("failed to serialize token: {e}"),
        })?;

        let write_failed = |e: std::io::Error| RailDataError::TokenFile {
            message: format!("failed to write {}: {e}", self.path.display()),
        };
        let mut tmp = NamedTempFile::new_in(dir).map_err(write_failed)?;
        tmp.write_all(json.as_bytes()).map_err(write_failed)?;
        tmp.persist(&self.path).map_err(|e| write_failed(e.error))?;
        Ok(())
    }

    /// A token listener that saves refreshed tokens to this file.
    ///
    /// An update is written only if the file is missing or still holds the
    /// update's previous token. Listener calls are unordered, so an update
    /// that arrives before its predecessor is held back and written once the
    /// predecessor lands. An update older than the stored token never
    /// overwrites it.
    pub fn listener(&self) -> impl Fn(TokenUpdate) + Send + Sync + use<> {
        let file = self.clone();
        // previous token -> new token, for updates that arrived early
        let pending: Mutex<HashMap<String, String>> = Mutex::new(HashMap::new());
        move |update: TokenUpdate| {
            let _guard = WRITE_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
            let mut pending = pending.lock().unwrap_or_else(PoisonError::into_inner);

            let stored = file.load();
            let mut target = match stored.as_deref() {
                None => update.new_token,
                Some(current) if current == update.previous_token => update.new_token,
                Some(current) if current == update.new_token => {
                    debug!(path = %file.path.display(), "token file already up to date");
                    return;
                }
                Some(_) => {
                    debug!(path = %file.path.display(), "holding back out-of-order token update");
                    pending.insert(update.previous_token, update.new_token);
                    return;
                }
            };
            while let Some(next) = pending.remove(&target) {
                target = next;
            }

            match file.save(&target) {
                Ok(()) => info!(path = %file.path.display(), "saved refreshed token"),
                Err(e) => warn!(error = %e, "could not persist refreshed token"),
            }
        }
    }
}
