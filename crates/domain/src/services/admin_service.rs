use crate::entities::Collection;
use crate::errors::DomainError;
use crate::repositories::ContentRepository;
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

/// Write side of the content store: whole-collection replacement.
///
/// The payload only has to be well-formed JSON. Shape is not checked, so a document
/// with duplicate ids or missing fields is stored as given.
pub struct AdminService {
    content_repository: Arc<dyn ContentRepository>,
}

impl AdminService {
    pub fn new(content_repository: Arc<dyn ContentRepository>) -> Self {
        Self { content_repository }
    }

    /// Parses `body` and overwrites the collection with it. Returns the confirmation
    /// message shown to the editor. Nothing is written when parsing fails.
    pub async fn replace(&self, collection: Collection, body: &[u8]) -> Result<String, DomainError> {
        let document: Value = serde_json::from_slice(body).map_err(|e| {
            warn!("Rejected {} update: {}", collection, e);
            DomainError::MalformedInput(e.to_string())
        })?;

        self.replace_document(collection, &document).await
    }

    pub async fn replace_document(
        &self,
        collection: Collection,
        document: &Value,
    ) -> Result<String, DomainError> {
        self.content_repository.store(collection, document).await?;
        info!("Replaced {} document", collection);
        Ok(success_message(collection))
    }
}

pub fn success_message(collection: Collection) -> String {
    format!("{} updated successfully", collection.label())
}
