//! Entity repositories
//!
//! `Database` is the typed face of the document store. Each entity module
//! adds an `impl Database` block with its CRUD; this module holds the shared
//! plumbing that converts between typed entities and stored documents.

use chrono::{SecondsFormat, Utc};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::store::{Document, DocumentStore, Query};

mod contacts;
mod leads;
mod organisations;
mod websites;

#[derive(Clone)]
pub struct Database {
    store: Arc<dyn DocumentStore>,
}

impl Database {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    /// Store a new entity. The store assigns the id; audit timestamps are
    /// stamped here regardless of what the caller put in.
    async fn insert<T: Serialize + DeserializeOwned>(&self, collection: &str, entity: &T) -> Result<T> {
        let mut doc = to_document(entity)?;
        doc.remove("id");
        let now = Value::String(now_stamp());
        doc.insert("createdAt".to_string(), now.clone());
        doc.insert("updatedAt".to_string(), now);

        let id = self.store.create(collection, doc.clone()).await?;
        doc.insert("id".to_string(), Value::String(id));
        from_document(doc)
    }

    async fn fetch<T: DeserializeOwned>(&self, collection: &str, id: &str) -> Result<Option<T>> {
        self.store
            .get(collection, id)
            .await?
            .map(from_document)
            .transpose()
    }

    async fn fetch_required<T: DeserializeOwned>(&self, collection: &str, id: &str) -> Result<T> {
        self.fetch(collection, id)
            .await?
            .ok_or_else(|| Error::not_found(collection, id))
    }

    async fn fetch_all<T: DeserializeOwned>(&self, collection: &str, query: &Query) -> Result<Vec<T>> {
        self.store
            .query(collection, query)
            .await?
            .into_iter()
            .map(from_document)
            .collect()
    }

    /// Targeted field update; bumps `updatedAt`.
    async fn write_fields(&self, collection: &str, id: &str, mut fields: Document) -> Result<()> {
        fields.insert(
            "updatedAt".to_string(),
            Value::String(now_stamp()),
        );
        self.store.update(collection, id, fields).await
    }

    async fn write_patch<P: Serialize>(&self, collection: &str, id: &str, patch: &P) -> Result<()> {
        self.write_fields(collection, id, to_document(patch)?).await
    }
}

/// Fixed-width UTC timestamp, so stored stamps sort lexically.
fn now_stamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn to_document<T: Serialize>(value: &T) -> Result<Document> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Err(Error::Validation(format!(
            "expected an object document, got {}",
            other
        ))),
    }
}

pub(crate) fn from_document<T: DeserializeOwned>(doc: Document) -> Result<T> {
    Ok(serde_json::from_value(Value::Object(doc))?)
}

/// Build a field update from `(name, value)` pairs.
pub(crate) fn fields<const N: usize>(pairs: [(&str, Value); N]) -> Document {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

#[cfg(test)]
pub(crate) fn memory_database() -> Database {
    Database::new(Arc::new(crate::store::MemoryStore::new()))
}
