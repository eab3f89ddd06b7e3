//! Error types for the dossier store and its facades.

use thiserror::Error;

/// Storage-related errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// An artifact with the same (community, scope, name) key already exists.
    /// Absent rows are not an error anywhere in the store: lookups return
    /// `Option` and removals return `bool`.
    #[error("An artifact named \"{0}\" already exists in this scope")]
    DuplicateName(String),

    #[error("Storage unavailable: {0}")]
    Unavailable(#[from] sled::Error),

    #[error("Key encoding error: {0}")]
    KeyCodec(#[from] bincode::Error),

    #[error("Record codec error: {0}")]
    RecordCodec(#[from] serde_json::Error),
}

/// Errors surfaced by the facades and boundary collaborators.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Actor {0} is not authorized to manage community-scoped state")]
    Unauthorized(String),

    #[error("Model catalog request failed: {0}")]
    CatalogUnavailable(String),

    #[error("Unsupported document type: {0}")]
    UnsupportedDocument(String),

    #[error("Document fetch failed: {0}")]
    DocumentFetchFailed(String),

    #[error("Document is not valid UTF-8 text: {0}")]
    DocumentNotText(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
