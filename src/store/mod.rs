//! Document store client
//!
//! The generic create/read/update/delete/query surface the repositories are
//! written against. There are no joins and no multi-document atomicity:
//! every call touches exactly one document (or reads one collection).

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::cmp::Ordering;

use crate::error::Result;

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// A stored document: a JSON object keyed by field name.
pub type Document = Map<String, Value>;

pub const ORGANISATIONS: &str = "organisations";
pub const CONTACTS: &str = "contacts";
pub const LEADS: &str = "leads";
pub const WEBSITES: &str = "websites";

#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    Eq(String, Value),
    NotEq(String, Value),
    /// Field is absent or null
    IsNull(String),
    /// Field is an array holding this value
    ArrayContains(String, Value),
}

impl Filter {
    pub fn eq(field: &str, value: impl Into<Value>) -> Self {
        Self::Eq(field.to_string(), value.into())
    }

    pub fn array_contains(field: &str, value: impl Into<Value>) -> Self {
        Self::ArrayContains(field.to_string(), value.into())
    }

    pub fn matches(&self, doc: &Document) -> bool {
        match self {
            Self::Eq(field, value) => doc.get(field) == Some(value),
            Self::NotEq(field, value) => doc.get(field) != Some(value),
            Self::IsNull(field) => doc.get(field).map_or(true, Value::is_null),
            Self::ArrayContains(field, value) => doc
                .get(field)
                .and_then(Value::as_array)
                .map_or(false, |items| items.contains(value)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sort {
    pub field: String,
    pub direction: Direction,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pub filters: Vec<Filter>,
    pub sort: Option<Sort>,
    pub limit: Option<usize>,
}

impl Query {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn sort_by(mut self, field: &str, direction: Direction) -> Self {
        self.sort = Some(Sort {
            field: field.to_string(),
            direction,
        });
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Filter, sort and truncate an already-loaded collection.
    pub fn apply(&self, docs: impl IntoIterator<Item = Document>) -> Vec<Document> {
        let mut out: Vec<Document> = docs
            .into_iter()
            .filter(|d| self.filters.iter().all(|f| f.matches(d)))
            .collect();

        if let Some(ref sort) = self.sort {
            out.sort_by(|a, b| {
                let ord = compare_values(a.get(&sort.field), b.get(&sort.field));
                match sort.direction {
                    Direction::Asc => ord,
                    Direction::Desc => ord.reverse(),
                }
            });
        }

        if let Some(limit) = self.limit {
            out.truncate(limit);
        }
        out
    }
}

/// Total order over optional JSON values: missing/null < bool < number < string.
/// Strings compare case-insensitively.
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    fn rank(v: Option<&Value>) -> u8 {
        match v {
            None | Some(Value::Null) => 0,
            Some(Value::Bool(_)) => 1,
            Some(Value::Number(_)) => 2,
            Some(Value::String(_)) => 3,
            Some(Value::Array(_)) => 4,
            Some(Value::Object(_)) => 5,
        }
    }

    match (a, b) {
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let (x, y) = (x.as_f64().unwrap_or(0.0), y.as_f64().unwrap_or(0.0));
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Some(Value::String(x)), Some(Value::String(y))) => {
            x.to_lowercase().cmp(&y.to_lowercase())
        }
        _ => rank(a).cmp(&rank(b)),
    }
}

/// Generic document-store operations against named collections.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a new document; the store assigns and returns its id
    async fn create(&self, collection: &str, doc: Document) -> Result<String>;

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>>;

    /// Shallow-merge `fields` into an existing document. A `null` value
    /// clears that field. Fails with `NotFound` if the document is absent.
    async fn update(&self, collection: &str, id: &str, fields: Document) -> Result<()>;

    /// Remove a document. Removing an absent document is not an error.
    async fn delete(&self, collection: &str, id: &str) -> Result<()>;

    async fn query(&self, collection: &str, query: &Query) -> Result<Vec<Document>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(v: Value) -> Document {
        v.as_object().unwrap().clone()
    }

    #[test]
    fn test_filters() {
        let d = doc(json!({"name": "Acme", "tags": ["a", "b"], "gone": null}));
        assert!(Filter::eq("name", "Acme").matches(&d));
        assert!(!Filter::eq("name", "acme").matches(&d));
        assert!(Filter::NotEq("name".into(), json!("Other")).matches(&d));
        assert!(Filter::IsNull("gone".into()).matches(&d));
        assert!(Filter::IsNull("missing".into()).matches(&d));
        assert!(!Filter::IsNull("name".into()).matches(&d));
        assert!(Filter::array_contains("tags", "b").matches(&d));
        assert!(!Filter::array_contains("tags", "c").matches(&d));
        assert!(!Filter::array_contains("name", "Acme").matches(&d));
    }

    #[test]
    fn test_apply_sort_and_limit() {
        let docs = vec![
            doc(json!({"name": "beta", "n": 2})),
            doc(json!({"name": "Alpha", "n": 3})),
            doc(json!({"n": 1})),
        ];

        let sorted = Query::all().sort_by("name", Direction::Asc).apply(docs.clone());
        let names: Vec<_> = sorted.iter().map(|d| d.get("name").cloned()).collect();
        assert_eq!(names, vec![None, Some(json!("Alpha")), Some(json!("beta"))]);

        let top = Query::all().sort_by("n", Direction::Desc).limit(2).apply(docs);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0]["n"], 3);
        assert_eq!(top[1]["n"], 2);
    }
}
