//! Persistence backends - durable key -> bool storage for unlock flags.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors reported by persistence backends.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// The backend cannot be reached at all.
    #[error("persistence unavailable: {0}")]
    Unavailable(String),
}

/// Durable key -> bool store surviving process restarts.
pub trait Persistence {
    /// Read a flag. Missing keys read as `false`.
    fn get(&self, key: &str) -> Result<bool, PersistenceError>;

    /// Write a flag.
    fn set(&mut self, key: &str, value: bool) -> Result<(), PersistenceError>;

    /// Every key currently stored.
    fn keys(&self) -> Result<Vec<String>, PersistenceError>;
}

impl<P: Persistence + ?Sized> Persistence for Box<P> {
    fn get(&self, key: &str) -> Result<bool, PersistenceError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: bool) -> Result<(), PersistenceError> {
        (**self).set(key, value)
    }

    fn keys(&self) -> Result<Vec<String>, PersistenceError> {
        (**self).keys()
    }
}

/// In-memory backend for tests and throwaway sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryPersistence {
    flags: HashMap<String, bool>,
}

impl MemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}

impl Persistence for MemoryPersistence {
    fn get(&self, key: &str) -> Result<bool, PersistenceError> {
        Ok(self.flags.get(key).copied().unwrap_or(false))
    }

    fn set(&mut self, key: &str, value: bool) -> Result<(), PersistenceError> {
        self.flags.insert(key.to_string(), value);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, PersistenceError> {
        Ok(self.flags.keys().cloned().collect())
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
struct FlagFile {
    flags: BTreeMap<String, bool>,
}

/// Write-through backend keeping all flags in one JSON object on disk.
///
/// A missing file is an empty store; the file is created on the first write.
#[derive(Debug)]
pub struct JsonFilePersistence {
    path: PathBuf,
    file: FlagFile,
}

impl JsonFilePersistence {
    /// Open (or prepare to create) the flag file at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, PersistenceError> {
        let path = path.as_ref().to_path_buf();

        let file = match std::fs::read_to_string(&path) {
            Ok(text) if text.trim().is_empty() => FlagFile::default(),
            Ok(text) => serde_json::from_str(&text)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => FlagFile::default(),
            Err(e) => return Err(e.into()),
        };

        log::debug!(
            "opened flag file {} with {} entries",
            path.display(),
            file.flags.len()
        );
        Ok(Self { path, file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let text = serde_json::to_string_pretty(&self.file)?;
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, text)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl Persistence for JsonFilePersistence {
    fn get(&self, key: &str) -> Result<bool, PersistenceError> {
        Ok(self.file.flags.get(key).copied().unwrap_or(false))
    }

    fn set(&mut self, key: &str, value: bool) -> Result<(), PersistenceError> {
        let previous = self.file.flags.insert(key.to_string(), value);

        if let Err(e) = self.flush() {
            // Keep memory in line with what is on disk
            match previous {
                Some(old) => self.file.flags.insert(key.to_string(), old),
                None => self.file.flags.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, PersistenceError> {
        Ok(self.file.flags.keys().cloned().collect())
    }
}
