//! Error types for dependency analysis and mutation operations

use doc_model::DocModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("missing resources: {}", .0.join(", "))]
    MissingResources(Vec<String>),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Failed to resolve story {story}: {source}")]
    LookupFailure {
        story: String,
        #[source]
        source: DocModelError,
    },

    #[error("Document model error: {0}")]
    DocModel(#[from] DocModelError),
}

pub type Result<T> = std::result::Result<T, EngineError>;
