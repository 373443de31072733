use crate::entities::Collection;
use crate::errors::DomainError;
use crate::repositories::ContentRepository;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Default)]
pub struct InMemoryContentRepository {
    documents: Mutex<HashMap<Collection, Value>>,
    stores: Mutex<usize>,
}

impl InMemoryContentRepository {
    pub fn put(&self, collection: Collection, document: Value) {
        self.documents.lock().unwrap().insert(collection, document);
    }

    pub fn get(&self, collection: Collection) -> Option<Value> {
        self.documents.lock().unwrap().get(&collection).cloned()
    }

    pub fn store_count(&self) -> usize {
        *self.stores.lock().unwrap()
    }
}

#[async_trait]
impl ContentRepository for InMemoryContentRepository {
    async fn load(&self, collection: Collection) -> Result<Value, DomainError> {
        self.get(collection)
            .ok_or_else(|| DomainError::IoFailure(format!("{} is missing", collection.file_name())))
    }

    async fn store(&self, collection: Collection, document: &Value) -> Result<(), DomainError> {
        *self.stores.lock().unwrap() += 1;
        self.put(collection, document.clone());
        Ok(())
    }

    async fn contains(&self, collection: Collection) -> Result<bool, DomainError> {
        Ok(self.get(collection).is_some())
    }
}
