//! Session storage and retrieval.
//!
//! Stores the authenticated principal in `<home>/session.json` with
//! restricted permissions (0600), alongside a `logged_in` marker file so
//! guards can check login state without parsing the full record. The store
//! is the single writer of both files; a malformed record on disk reads as
//! "logged out", never as an error.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::paths;
use crate::roles::Role;

/// Session record filename.
const SESSION_FILE: &str = "session.json";
/// Login marker filename.
const LOGGED_IN_FILE: &str = "logged_in";

/// The authenticated principal's credentials and resolved role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Opaque user identifier from the backend.
    pub user_id: String,
    /// API key half of the bearer credential pair.
    pub api_key: String,
    /// API secret half of the bearer credential pair.
    pub api_secret: String,
    /// Role resolved at the login boundary.
    pub role: Role,
}

impl Session {
    /// Returns the `Authorization` header value for this session, or `None`
    /// when either credential half is empty.
    pub fn authorization(&self) -> Option<String> {
        if self.api_key.is_empty() || self.api_secret.is_empty() {
            return None;
        }
        Some(format!("token {}:{}", self.api_key, self.api_secret))
    }

    /// Returns a masked version of the API secret for display.
    pub fn masked_secret(&self) -> String {
        if self.api_secret.len() <= 8 {
            return "***".to_string();
        }
        format!("{}...", &self.api_secret[..6])
    }
}

/// Durable session store with an in-memory copy of the persisted record.
///
/// Memory and disk agree after every `save`/`clear`; `open` and `load`
/// re-read disk and degrade malformed records to "no session".
#[derive(Debug)]
pub struct SessionStore {
    dir: PathBuf,
    current: RwLock<Option<Session>>,
}

impl SessionStore {
    /// Opens the store rooted at `dir`, reading any persisted session.
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let current = RwLock::new(read_record(&dir.join(SESSION_FILE)));
        Self { dir, current }
    }

    /// Opens the store rooted at the paydesk home directory.
    pub fn open_default() -> Self {
        Self::open(paths::paydesk_home())
    }

    /// Returns the path to the session record.
    pub fn session_path(&self) -> PathBuf {
        self.dir.join(SESSION_FILE)
    }

    /// Returns the path to the login marker file.
    pub fn marker_path(&self) -> PathBuf {
        self.dir.join(LOGGED_IN_FILE)
    }

    /// Returns the in-memory session, if any.
    pub fn current(&self) -> Option<Session> {
        self.current
            .read()
            .expect("session store lock poisoned")
            .clone()
    }

    /// Re-reads the persisted record, refreshing the in-memory copy.
    ///
    /// Absent or malformed records return `None`; this never fails.
    pub fn load(&self) -> Option<Session> {
        let session = read_record(&self.session_path());
        *self.current.write().expect("session store lock poisoned") = session.clone();
        session
    }

    /// Persists `session` and updates the in-memory copy.
    ///
    /// The record is written to a temp file with mode 0600 and renamed into
    /// place, so no reader observes a partially written session.
    ///
    /// # Errors
    /// Returns an error if the operation fails.
    pub fn save(&self, session: &Session) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create directory {}", self.dir.display()))?;

        let contents = serde_json::to_string_pretty(session)
            .context("Failed to serialize session")?;
        write_restricted(&self.session_path(), contents.as_bytes())?;

        let marker = self.marker_path();
        fs::write(&marker, b"true")
            .with_context(|| format!("Failed to write {}", marker.display()))?;

        *self.current.write().expect("session store lock poisoned") = Some(session.clone());
        Ok(())
    }

    /// Removes the persisted record and marker and resets to "logged out".
    ///
    /// # Errors
    /// Returns an error if the operation fails.
    pub fn clear(&self) -> Result<()> {
        remove_if_present(&self.session_path())?;
        remove_if_present(&self.marker_path())?;
        *self.current.write().expect("session store lock poisoned") = None;
        Ok(())
    }

    /// Returns whether a login marker is present.
    ///
    /// This intentionally checks only the marker file, not the session
    /// record, so it stays cheap and parse-free.
    pub fn is_logged_in(&self) -> bool {
        self.marker_path().exists()
    }

    /// Returns the resolved role of the current session, if any.
    pub fn role(&self) -> Option<Role> {
        self.current().map(|s| s.role)
    }
}

/// Reads and validates the persisted record, degrading failures to `None`.
fn read_record(path: &Path) -> Option<Session> {
    let contents = fs::read_to_string(path).ok()?;
    match serde_json::from_str(&contents) {
        Ok(session) => Some(session),
        Err(err) => {
            tracing::warn!(
                path = %path.display(),
                error = %err,
                "ignoring malformed session record"
            );
            None
        }
    }
}

/// Writes `contents` to `path` atomically with mode 0600.
fn write_restricted(path: &Path, contents: &[u8]) -> Result<()> {
    let tmp_path = path.with_extension("json.tmp");

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(0o600)
            .open(&tmp_path)
            .with_context(|| format!("Failed to open {} for writing", tmp_path.display()))?;
        file.write_all(contents)
            .with_context(|| format!("Failed to write to {}", tmp_path.display()))?;
    }

    #[cfg(not(unix))]
    {
        fs::write(&tmp_path, contents)
            .with_context(|| format!("Failed to write to {}", tmp_path.display()))?;
    }

    fs::rename(&tmp_path, path).with_context(|| {
        format!(
            "Failed to rename {} to {}",
            tmp_path.display(),
            path.display()
        )
    })
}

fn remove_if_present(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(err) => {
            Err(err).with_context(|| format!("Failed to remove {}", path.display()))
        }
    }
}
