use thiserror::Error;

use crate::entities::Collection;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("{kind} not found: {key}")]
    NotFound { kind: &'static str, key: String },

    #[error("IO error: {0}")]
    IoFailure(String),

    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Stored {collection} document is corrupt: {reason}")]
    CorruptCollection {
        collection: Collection,
        reason: String,
    },
}

impl DomainError {
    pub fn project_not_found(id: &str) -> Self {
        DomainError::NotFound {
            kind: "Project",
            key: id.to_string(),
        }
    }

    pub fn blog_not_found(slug: &str) -> Self {
        DomainError::NotFound {
            kind: "Blog",
            key: slug.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DomainError::NotFound { .. })
    }
}
