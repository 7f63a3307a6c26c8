//! Error types for document model operations

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocModelError {
    #[error("Story not found: {id} (expected at {location})")]
    StoryNotFound { id: String, location: String },

    #[error("Spread not found: {0}")]
    SpreadNotFound(String),

    #[error("Page item not found: {item_id} in spread {spread_id}")]
    PageItemNotFound { spread_id: String, item_id: String },

    #[error("{category} not found: {id}")]
    ResourceNotFound { category: &'static str, id: String },

    #[error("Duplicate identifier: {0}")]
    DuplicateId(String),
}

pub type Result<T> = std::result::Result<T, DocModelError>;
