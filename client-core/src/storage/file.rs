//! File-backed session store.

use std::fs;
use std::path::PathBuf;

use tracing::debug;

use crate::errors::StorageError;

use super::{Session, SessionStore};

const APP_DIR: &str = ".tikiricare";
const SESSION_FILE: &str = "session.json";

/// Persists the session as a single JSON file under the user's home
/// directory. Writes go to a sibling temp file first and are renamed
/// into place, so readers only ever see a complete record.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Store backed by an explicit file path.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store at the default location, `~/.tikiricare/session.json`.
    pub fn default_location() -> Result<Self, StorageError> {
        let home = dirs::home_dir().ok_or(StorageError::NoHomeDir)?;
        Ok(Self::new(home.join(APP_DIR).join(SESSION_FILE)))
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<Session>, StorageError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&self.path)?;
        let session: Session = serde_json::from_str(&contents)?;
        Ok(Some(session))
    }

    fn save(&self, session: &Session) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(session)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        debug!(path = %self.path.display(), "session saved");
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StorageError::Io(err)),
        }
    }
}
