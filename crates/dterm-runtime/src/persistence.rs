//! Saved dashboard state.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use serde_json::Value;

use crate::error::StorageError;
use crate::snapshot::DashboardSnapshot;

/// Where the dashboard is restored from and autosaved to.
pub trait Persistence: fmt::Debug + Send {
    /// The saved snapshot, or `None` when nothing has been saved yet.
    fn load(&self) -> Result<Option<DashboardSnapshot>, StorageError>;

    fn save(&mut self, snapshot: &DashboardSnapshot) -> Result<(), StorageError>;
}

fn decode(text: &str) -> Result<DashboardSnapshot, StorageError> {
    let value: Value = serde_json::from_str(text)?;
    Ok(DashboardSnapshot::from_value(value)?)
}

/// A JSON file, replaced atomically on save.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io(&self, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl Persistence for FileStorage {
    fn load(&self) -> Result<Option<DashboardSnapshot>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(text) => decode(&text).map(Some),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(self.io(err)),
        }
    }

    fn save(&mut self, snapshot: &DashboardSnapshot) -> Result<(), StorageError> {
        let text = snapshot.to_pretty_json()?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io(e))?;
        }
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        fs::write(&tmp, text).map_err(|e| self.io(e))?;
        fs::rename(&tmp, &self.path).map_err(|e| self.io(e))?;
        tracing::debug!(target: "dterm.persistence", path = %self.path.display(), "dashboard saved");
        Ok(())
    }
}

/// In-memory storage. Clones share the same slot, so a test can keep a
/// handle and inspect what the console wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage preloaded with raw JSON text.
    #[must_use]
    pub fn with_json(text: impl Into<String>) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(text.into()))),
        }
    }

    /// The raw text last written.
    #[must_use]
    pub fn raw(&self) -> Option<String> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Persistence for MemoryStorage {
    fn load(&self) -> Result<Option<DashboardSnapshot>, StorageError> {
        self.raw().as_deref().map(decode).transpose()
    }

    fn save(&mut self, snapshot: &DashboardSnapshot) -> Result<(), StorageError> {
        let text = serde_json::to_string(snapshot)?;
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(text);
        Ok(())
    }
}
