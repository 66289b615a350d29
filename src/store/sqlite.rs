//! SQLite-backed document store.
//!
//! Every collection shares one `documents` table; bodies are JSON text.
//! Filtering and sorting happen after decoding, so no JSON1 functions are
//! needed.

use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::Value;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

use super::{Document, DocumentStore, Query};
use crate::error::{Error, Result};

pub const SCHEMA_VERSION: i32 = 1;

const SCHEMA_V1: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    version INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS documents (
    collection TEXT NOT NULL,
    id TEXT NOT NULL,
    body TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    PRIMARY KEY (collection, id)
);

CREATE INDEX IF NOT EXISTS idx_documents_collection ON documents(collection);
"#;

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open database, creating if needed, running migrations
    pub fn open_at(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::Store(format!("create {}: {}", parent.display(), e)))?;
        }
        Self::init(Connection::open(path)?)
    }

    /// Open in-memory database for testing
    pub fn open_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.migrate()?;
        Ok(store)
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| Error::Store("sqlite connection lock poisoned".to_string()))
    }

    fn migrate(&self) -> Result<()> {
        let conn = self.conn()?;
        let version = Self::schema_version(&conn)?;

        if version == 0 {
            // Run migration in a transaction for atomicity
            conn.execute_batch(&format!("BEGIN TRANSACTION; {} COMMIT;", SCHEMA_V1))?;
            conn.execute(
                "INSERT OR REPLACE INTO schema_version (id, version) VALUES (1, ?)",
                [SCHEMA_VERSION],
            )?;
        }
        Ok(())
    }

    fn schema_version(conn: &Connection) -> Result<i32> {
        let exists: bool = conn.query_row(
            "SELECT COUNT(*) > 0 FROM sqlite_master WHERE type = 'table' AND name = 'schema_version'",
            [],
            |row| row.get(0),
        )?;
        if !exists {
            return Ok(0);
        }

        let version = conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(version.unwrap_or(0))
    }

    fn decode(body: &str) -> Result<Document> {
        match serde_json::from_str(body)? {
            Value::Object(map) => Ok(map),
            other => Err(Error::Store(format!(
                "stored document is not an object: {}",
                other
            ))),
        }
    }

    fn load(conn: &Connection, collection: &str, id: &str) -> Result<Option<Document>> {
        let body: Option<String> = conn
            .query_row(
                "SELECT body FROM documents WHERE collection = ? AND id = ?",
                params![collection, id],
                |row| row.get(0),
            )
            .optional()?;
        body.as_deref().map(Self::decode).transpose()
    }
}

#[async_trait]
impl DocumentStore for SqliteStore {
    async fn create(&self, collection: &str, mut doc: Document) -> Result<String> {
        let id = Uuid::new_v4().to_string();
        doc.insert("id".to_string(), Value::String(id.clone()));
        let now = Utc::now().to_rfc3339();

        self.conn()?.execute(
            "INSERT INTO documents (collection, id, body, created_at, updated_at) VALUES (?, ?, ?, ?, ?)",
            params![collection, id, Value::Object(doc).to_string(), now, now],
        )?;
        Ok(id)
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>> {
        let conn = self.conn()?;
        Self::load(&conn, collection, id)
    }

    async fn update(&self, collection: &str, id: &str, fields: Document) -> Result<()> {
        let conn = self.conn()?;
        let mut doc =
            Self::load(&conn, collection, id)?.ok_or_else(|| Error::not_found(collection, id))?;
        for (key, value) in fields {
            if key != "id" {
                doc.insert(key, value);
            }
        }

        conn.execute(
            "UPDATE documents SET body = ?, updated_at = ? WHERE collection = ? AND id = ?",
            params![
                Value::Object(doc).to_string(),
                Utc::now().to_rfc3339(),
                collection,
                id
            ],
        )?;
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<()> {
        self.conn()?.execute(
            "DELETE FROM documents WHERE collection = ? AND id = ?",
            params![collection, id],
        )?;
        Ok(())
    }

    async fn query(&self, collection: &str, query: &Query) -> Result<Vec<Document>> {
        let conn = self.conn()?;
        let mut stmt =
            conn.prepare("SELECT body FROM documents WHERE collection = ? ORDER BY created_at")?;
        let bodies = stmt
            .query_map([collection], |row| row.get::<_, String>(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let docs = bodies
            .iter()
            .map(|b| Self::decode(b))
            .collect::<Result<Vec<_>>>()?;
        Ok(query.apply(docs))
    }
}
