//! Document store for exercise records.
//!
//! # Design
//! The service only talks to `dyn ExerciseStore`, so a backend is picked once
//! at startup from a connection string and handed to the router. Ids cross
//! this boundary as raw path text: a value that is not a valid id simply
//! matches nothing, it is never a store error.

mod memory;
mod sqlite;

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::model::{Exercise, ExerciseFields};

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Storage operations the exercise service depends on.
#[async_trait]
pub trait ExerciseStore: Send + Sync {
    /// Persist a new record, assigning its id and initial revision.
    async fn insert(&self, fields: ExerciseFields) -> Result<Exercise, StoreError>;

    /// Every record, oldest first.
    async fn find_all(&self) -> Result<Vec<Exercise>, StoreError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Exercise>, StoreError>;

    /// Overwrite all editable fields of a record. `None` if it does not exist.
    async fn replace_fields(
        &self,
        id: &str,
        fields: ExerciseFields,
    ) -> Result<Option<Exercise>, StoreError>;

    /// Remove a record, returning how many were removed (0 or 1).
    async fn delete_by_id(&self, id: &str) -> Result<u64, StoreError>;

    /// Drop every record in the collection.
    async fn clear(&self) -> Result<(), StoreError>;
}

/// Parse a path id, treating anything malformed as "no such record".
pub(crate) fn parse_id(id: &str) -> Option<Uuid> {
    Uuid::parse_str(id).ok()
}

/// Failures raised by a store backend.
#[derive(Debug)]
pub enum StoreError {
    /// The backend could not be opened or initialised.
    Open(String),

    /// A read or write against the backend failed.
    Backend(String),

    /// A persisted document could not be decoded.
    Corrupt { id: String, reason: String },

    /// The blocking worker running a backend call did not complete.
    Worker(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Open(msg) => write!(f, "could not open store: {msg}"),
            StoreError::Backend(msg) => write!(f, "store operation failed: {msg}"),
            StoreError::Corrupt { id, reason } => {
                write!(f, "stored document {id} is corrupt: {reason}")
            }
            StoreError::Worker(msg) => write!(f, "store worker failed: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::Backend(err.to_string())
    }
}

/// Where the exercise collection lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreUrl {
    /// In-process collection, lost on exit.
    Memory,
    /// SQLite database held in memory.
    SqliteMemory,
    /// SQLite database file.
    SqliteFile(PathBuf),
}

impl FromStr for StoreUrl {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();
        if raw == "memory" {
            return Ok(StoreUrl::Memory);
        }
        if raw == "sqlite::memory:" {
            return Ok(StoreUrl::SqliteMemory);
        }
        let path = raw
            .strip_prefix("sqlite://")
            .or_else(|| raw.strip_prefix("sqlite:"))
            .ok_or_else(|| format!("unsupported store url: {raw}"))?;
        if path.is_empty() {
            return Err(format!("store url has no database path: {raw}"));
        }
        Ok(StoreUrl::SqliteFile(PathBuf::from(path)))
    }
}

impl fmt::Display for StoreUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreUrl::Memory => write!(f, "memory"),
            StoreUrl::SqliteMemory => write!(f, "sqlite::memory:"),
            StoreUrl::SqliteFile(path) => write!(f, "sqlite:{}", path.display()),
        }
    }
}

/// Open the backend named by `url`.
pub fn open(url: &StoreUrl) -> Result<Arc<dyn ExerciseStore>, StoreError> {
    let store: Arc<dyn ExerciseStore> = match url {
        StoreUrl::Memory => Arc::new(MemoryStore::new()),
        StoreUrl::SqliteMemory => Arc::new(SqliteStore::open_in_memory()?),
        StoreUrl::SqliteFile(path) => Arc::new(SqliteStore::open(path)?),
    };
    tracing::info!(store = %url, "exercise store opened");
    Ok(store)
}
