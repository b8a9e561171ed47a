use std::path::Path;

use rusqlite::Connection;
use thiserror::Error;

/// Collection keys follow the layout the UI persisted historically.
pub const COLL_LECTURERS: &str = "dataDosen";
pub const COLL_STUDENTS: &str = "dataMahasiswa";
pub const COLL_CLASSES: &str = "dataKelas";
pub const KEY_SESSION: &str = "user";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage full: {0}")]
    Full(String),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Durable key -> JSON-document mapping, the only source of truth.
///
/// Documents live whole in a single table; callers always replace the full
/// document for a key (read-modify-write), matching the observable behavior
/// of the storage layer this replaces.
pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn open(workspace: &Path) -> anyhow::Result<Store> {
        std::fs::create_dir_all(workspace)?;
        let db_path = workspace.join("siakad.sqlite3");
        let conn = Connection::open(db_path)?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS collections(
                name TEXT PRIMARY KEY,
                doc TEXT NOT NULL
            )",
            [],
        )?;

        Ok(Store { conn })
    }

    /// Fetch a document. A stored value that no longer parses as JSON is
    /// treated as absent so the caller can re-seed it (self-healing); it is
    /// not reported as corruption.
    pub fn get(&self, key: &str) -> Result<Option<serde_json::Value>, StoreError> {
        use rusqlite::OptionalExtension;

        let raw: Option<String> = self
            .conn
            .query_row("SELECT doc FROM collections WHERE name = ?", [key], |r| {
                r.get(0)
            })
            .optional()
            .map_err(map_sqlite_err)?;

        Ok(raw.and_then(|s| serde_json::from_str(&s).ok()))
    }

    pub fn set(&self, key: &str, doc: &serde_json::Value) -> Result<(), StoreError> {
        let raw = doc.to_string();
        self.conn
            .execute(
                "INSERT INTO collections(name, doc) VALUES(?, ?)
                 ON CONFLICT(name) DO UPDATE SET doc = excluded.doc",
                (key, &raw),
            )
            .map_err(map_sqlite_err)?;
        Ok(())
    }

    pub fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.conn
            .execute("DELETE FROM collections WHERE name = ?", [key])
            .map_err(map_sqlite_err)?;
        Ok(())
    }
}

fn map_sqlite_err(e: rusqlite::Error) -> StoreError {
    if let rusqlite::Error::SqliteFailure(inner, _) = &e {
        if matches!(
            inner.code,
            rusqlite::ErrorCode::DiskFull | rusqlite::ErrorCode::TooBig
        ) {
            return StoreError::Full(e.to_string());
        }
    }
    StoreError::Unavailable(e.to_string())
}
