//! SQLite-backed exercise collection.
//!
//! # Design
//! Each record is one row holding the document as JSON text next to its id
//! and revision, so the table stays a plain document collection. `seq` keeps
//! insertion order for `find_all`. The connection sits behind a mutex and is
//! only touched from `spawn_blocking`, keeping rusqlite off the async workers.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension, Row};
use uuid::Uuid;

use super::{parse_id, ExerciseStore, StoreError};
use crate::model::{Exercise, ExerciseFields};

const SCHEMA_SQL: &str = "CREATE TABLE IF NOT EXISTS exercises (
    seq INTEGER PRIMARY KEY AUTOINCREMENT,
    id TEXT NOT NULL UNIQUE,
    revision INTEGER NOT NULL,
    doc TEXT NOT NULL
);";

const SELECT_SQL: &str = "SELECT id, revision, doc FROM exercises";

pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open (or create) a database file and ensure the collection exists.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(|e| StoreError::Open(e.to_string()))?;
        Self::bootstrap(conn)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(|e| StoreError::Open(e.to_string()))?;
        Self::bootstrap(conn)
    }

    fn bootstrap(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(SCHEMA_SQL)
            .map_err(|e| StoreError::Open(e.to_string()))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    async fn with_conn<T, F>(&self, f: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T, StoreError> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let guard = conn
                .lock()
                .map_err(|_| StoreError::Worker("sqlite connection lock poisoned".to_string()))?;
            f(&*guard)
        })
        .await
        .map_err(|e| StoreError::Worker(e.to_string()))?
    }
}

#[async_trait]
impl ExerciseStore for SqliteStore {
    async fn insert(&self, fields: ExerciseFields) -> Result<Exercise, StoreError> {
        let exercise = Exercise::new(Uuid::new_v4(), fields, 0);
        let doc = encode_doc(&exercise)?;
        let id = exercise.id.to_string();
        let revision = exercise.revision as i64;
        self.with_conn(move |conn| {
            conn.execute(
                "INSERT INTO exercises (id, revision, doc) VALUES (?1, ?2, ?3);",
                params![id, revision, doc],
            )?;
            Ok(())
        })
        .await?;
        Ok(exercise)
    }

    async fn find_all(&self) -> Result<Vec<Exercise>, StoreError> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!("{SELECT_SQL} ORDER BY seq;"))?;
            let rows = stmt.query_map([], read_row)?;
            let mut out = Vec::new();
            for row in rows {
                let (id, revision, doc) = row?;
                out.push(decode_doc(id, revision, &doc)?);
            }
            Ok(out)
        })
        .await
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Exercise>, StoreError> {
        let Some(id) = parse_id(id) else {
            return Ok(None);
        };
        self.with_conn(move |conn| select_one(conn, &id.to_string()))
            .await
    }

    async fn replace_fields(
        &self,
        id: &str,
        fields: ExerciseFields,
    ) -> Result<Option<Exercise>, StoreError> {
        let Some(id) = parse_id(id) else {
            return Ok(None);
        };
        let doc = serde_json::to_string(&fields)
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        self.with_conn(move |conn| {
            let id = id.to_string();
            let changed = conn.execute(
                "UPDATE exercises SET doc = ?1 WHERE id = ?2;",
                params![doc, id],
            )?;
            if changed == 0 {
                return Ok(None);
            }
            select_one(conn, &id)
        })
        .await
    }

    async fn delete_by_id(&self, id: &str) -> Result<u64, StoreError> {
        let Some(id) = parse_id(id) else {
            return Ok(0);
        };
        self.with_conn(move |conn| {
            let removed = conn.execute(
                "DELETE FROM exercises WHERE id = ?1;",
                params![id.to_string()],
            )?;
            Ok(removed as u64)
        })
        .await
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.with_conn(|conn| {
            conn.execute("DELETE FROM exercises;", [])?;
            Ok(())
        })
        .await
    }
}

fn read_row(row: &Row<'_>) -> rusqlite::Result<(String, i64, String)> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?))
}

fn select_one(conn: &Connection, id: &str) -> Result<Option<Exercise>, StoreError> {
    let row = conn
        .query_row(
            &format!("{SELECT_SQL} WHERE id = ?1;"),
            params![id],
            read_row,
        )
        .optional()?;
    row.map(|(id, revision, doc)| decode_doc(id, revision, &doc))
        .transpose()
}

fn encode_doc(exercise: &Exercise) -> Result<String, StoreError> {
    serde_json::to_string(&exercise.fields()).map_err(|e| StoreError::Backend(e.to_string()))
}

fn decode_doc(id: String, revision: i64, doc: &str) -> Result<Exercise, StoreError> {
    let uuid = Uuid::parse_str(&id).map_err(|e| StoreError::Corrupt {
        id: id.clone(),
        reason: e.to_string(),
    })?;
    let fields: ExerciseFields = serde_json::from_str(doc).map_err(|e| StoreError::Corrupt {
        id: id.clone(),
        reason: e.to_string(),
    })?;
    let revision = u64::try_from(revision).map_err(|_| StoreError::Corrupt {
        id,
        reason: format!("negative revision {revision}"),
    })?;
    Ok(Exercise::new(uuid, fields, revision))
}
