use domain::*;
use infrastructure::*;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::warn;

/// Portfolio Application - wires the JSON store into the domain services
pub struct PortfolioApp {
    pub content_service: ContentService,
    pub admin_service: AdminService,
}

impl PortfolioApp {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        // Infrastructure layer - one JSON file per collection
        let content_repository: Arc<dyn ContentRepository> =
            Arc::new(JsonFileContentRepository::new(data_dir));

        Self::with_repository(content_repository)
    }

    /// Builds the app over any store implementation.
    pub fn with_repository(content_repository: Arc<dyn ContentRepository>) -> Self {
        Self {
            content_service: ContentService::new(content_repository.clone()),
            admin_service: AdminService::new(content_repository),
        }
    }

    /// Logs collections that have no document in the store. Reads of those collections
    /// fail until one is created, by hand or through an admin write.
    pub async fn report_missing_collections(&self) -> Vec<Collection> {
        match self.content_service.missing_collections().await {
            Ok(missing) => {
                for collection in &missing {
                    warn!("⚠️  {} has no document in the content store", collection);
                }
                missing
            }
            Err(e) => {
                warn!("⚠️  Could not check the content store: {}", e);
                Vec::new()
            }
        }
    }
}
