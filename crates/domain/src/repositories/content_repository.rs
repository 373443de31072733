use crate::entities::Collection;
use crate::errors::DomainError;
use async_trait::async_trait;
use serde_json::Value;

/// Port to the content store.
///
/// Implementations must not cache: every `load` reads the backing storage again so
/// that documents edited outside the process are picked up on the next request.
#[async_trait]
pub trait ContentRepository: Send + Sync {
    /// Reads and parses one collection document.
    async fn load(&self, collection: Collection) -> Result<Value, DomainError>;

    /// Replaces a collection document wholesale.
    async fn store(&self, collection: Collection, document: &Value) -> Result<(), DomainError>;

    /// Whether a document for `collection` exists yet. Says nothing about whether it parses.
    async fn contains(&self, collection: Collection) -> Result<bool, DomainError>;
}
