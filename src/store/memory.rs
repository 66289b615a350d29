//! In-memory document store.
//!
//! Backs tests and throwaway sessions. Nothing is persisted.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{Document, DocumentStore, Query};
use crate::error::{Error, Result};

#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, BTreeMap<String, Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn create(&self, collection: &str, mut doc: Document) -> Result<String> {
        let id = Uuid::new_v4().to_string();
        doc.insert("id".to_string(), Value::String(id.clone()));
        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .insert(id.clone(), doc);
        Ok(id)
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>> {
        Ok(self
            .collections
            .read()
            .await
            .get(collection)
            .and_then(|c| c.get(id))
            .cloned())
    }

    async fn update(&self, collection: &str, id: &str, fields: Document) -> Result<()> {
        let mut collections = self.collections.write().await;
        let doc = collections
            .get_mut(collection)
            .and_then(|c| c.get_mut(id))
            .ok_or_else(|| Error::not_found(collection, id))?;
        for (key, value) in fields {
            if key != "id" {
                doc.insert(key, value);
            }
        }
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<()> {
        if let Some(c) = self.collections.write().await.get_mut(collection) {
            c.remove(id);
        }
        Ok(())
    }

    async fn query(&self, collection: &str, query: &Query) -> Result<Vec<Document>> {
        let docs: Vec<Document> = self
            .collections
            .read()
            .await
            .get(collection)
            .map(|c| c.values().cloned().collect())
            .unwrap_or_default();
        Ok(query.apply(docs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Filter;
    use serde_json::json;

    fn doc(v: Value) -> Document {
        v.as_object().unwrap().clone()
    }

    #[tokio::test]
    async fn test_create_assigns_id() {
        let store = MemoryStore::new();
        let id = store.create("things", doc(json!({"name": "a"}))).await.unwrap();

        let got = store.get("things", &id).await.unwrap().unwrap();
        assert_eq!(got["id"], json!(id));
        assert_eq!(got["name"], "a");
        assert_eq!(store.query("things", &Query::all()).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_merges_fields() {
        let store = MemoryStore::new();
        let id = store
            .create("things", doc(json!({"a": 1, "b": 2})))
            .await
            .unwrap();

        store
            .update("things", &id, doc(json!({"b": null, "c": 3, "id": "hijack"})))
            .await
            .unwrap();

        let got = store.get("things", &id).await.unwrap().unwrap();
        assert_eq!(got["a"], 1);
        assert!(got["b"].is_null());
        assert_eq!(got["c"], 3);
        assert_eq!(got["id"], json!(id));
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let store = MemoryStore::new();
        let err = store
            .update("things", "nope", Document::new())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = MemoryStore::new();
        let id = store.create("things", Document::new()).await.unwrap();
        store.delete("things", &id).await.unwrap();
        store.delete("things", &id).await.unwrap();
        store.delete("other", "x").await.unwrap();
        assert!(store.get("things", &id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_query_filters() {
        let store = MemoryStore::new();
        store.create("things", doc(json!({"k": "x"}))).await.unwrap();
        store.create("things", doc(json!({"k": "y"}))).await.unwrap();

        let hits = store
            .query("things", &Query::all().filter(Filter::eq("k", "y")))
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert!(store.query("empty", &Query::all()).await.unwrap().is_empty());
    }
}
