use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Key/value blob store holding serialized collections, e.g. a browser-style local store,
/// a file per key, or a single database row.
pub trait LedgerStore: Send + Sync {
    fn read(&self, key: &str) -> Result<Option<String>, PersistenceError>;
    fn write(&self, key: &str, value: &str) -> Result<(), PersistenceError>;
}

/// Failures crossing the ledger persistence boundary.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("stored audit ledger is malformed: {0}")]
    Deserialization(#[source] serde_json::Error),
    #[error("audit ledger could not be serialized: {0}")]
    Serialization(#[source] serde_json::Error),
    #[error("ledger store unavailable: {0}")]
    Unavailable(String),
    #[error("ledger store io error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Process-local store, useful for tests and ephemeral runs.
#[derive(Debug, Default, Clone)]
pub struct InMemoryLedgerStore {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryLedgerStore {
    pub fn with_value(key: &str, value: &str) -> Self {
        let store = Self::default();
        store
            .values
            .lock()
            .expect("ledger store mutex poisoned")
            .insert(key.to_string(), value.to_string());
        store
    }
}

impl LedgerStore for InMemoryLedgerStore {
    fn read(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        let guard = self.values.lock().expect("ledger store mutex poisoned");
        Ok(guard.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        let mut guard = self.values.lock().expect("ledger store mutex poisoned");
        guard.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileLedgerStore {
    dir: PathBuf,
}

impl FileLedgerStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl LedgerStore for FileLedgerStore {
    fn read(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(PersistenceError::Io { path, source }),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        fs::create_dir_all(&self.dir).map_err(|source| PersistenceError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let path = self.path_for(key);
        let staging = path.with_extension("json.tmp");
        fs::write(&staging, value).map_err(|source| PersistenceError::Io {
            path: staging.clone(),
            source,
        })?;
        fs::rename(&staging, &path).map_err(|source| PersistenceError::Io { path, source })
    }
}
