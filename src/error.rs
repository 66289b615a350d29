use thiserror::Error;

/// Errors surfaced by the store, repositories and relationship coordinator.
///
/// Hooks flatten every variant to its `Display` text before showing it, so
/// not-found and transport failures look the same to an end user.
#[derive(Error, Debug)]
pub enum Error {
    #[error("{collection} document {id} not found")]
    NotFound { collection: String, id: String },

    #[error("invalid input: {0}")]
    Validation(String),

    #[error("{kind} {id} is still referenced by {count} document(s)")]
    Referenced {
        kind: &'static str,
        id: String,
        count: usize,
    },

    #[error("cascade cleanup for {id} incomplete; failed: {}", failed.join(", "))]
    PartialCascade { id: String, failed: Vec<String> },

    #[error("store failure: {0}")]
    Store(String),

    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    #[error(transparent)]
    Serde(#[from] serde_json::Error),
}

impl Error {
    pub fn not_found(collection: &str, id: &str) -> Self {
        Self::NotFound {
            collection: collection.to_string(),
            id: id.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
