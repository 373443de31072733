use crate::entities::{Achievement, BlogPost, Collection, ContentBlock, Profile, Project};
use crate::errors::DomainError;
use crate::repositories::ContentRepository;
use crate::services::catalog::{self, AchievementGroup, CatalogQuery};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

pub const RELATED_POSTS_LIMIT: usize = 3;

/// Read side of the content store.
///
/// Raw accessors return documents exactly as stored; typed accessors decode them
/// into entities for filtering and derived views.
pub struct ContentService {
    content_repository: Arc<dyn ContentRepository>,
}

impl ContentService {
    pub fn new(content_repository: Arc<dyn ContentRepository>) -> Self {
        Self { content_repository }
    }

    /// Whole collection document, verbatim.
    pub async fn raw(&self, collection: Collection) -> Result<Value, DomainError> {
        self.content_repository.load(collection).await
    }

    /// Collections the store has no document for yet.
    pub async fn missing_collections(&self) -> Result<Vec<Collection>, DomainError> {
        let mut missing = Vec::new();
        for collection in Collection::ALL {
            if !self.content_repository.contains(collection).await? {
                missing.push(collection);
            }
        }
        Ok(missing)
    }

    pub async fn raw_project(&self, id: &str) -> Result<Value, DomainError> {
        self.raw_item(Collection::Projects, "id", id)
            .await?
            .ok_or_else(|| DomainError::project_not_found(id))
    }

    pub async fn raw_blog(&self, slug: &str) -> Result<Value, DomainError> {
        self.raw_item(Collection::Blogs, "slug", slug)
            .await?
            .ok_or_else(|| DomainError::blog_not_found(slug))
    }

    // First element whose string `field` equals `key`.
    async fn raw_item(
        &self,
        collection: Collection,
        field: &str,
        key: &str,
    ) -> Result<Option<Value>, DomainError> {
        let document = self.raw(collection).await?;
        let Value::Array(items) = document else {
            return Err(DomainError::CorruptCollection {
                collection,
                reason: "expected a JSON array".to_string(),
            });
        };

        Ok(items
            .into_iter()
            .find(|item| item.get(field).and_then(Value::as_str) == Some(key)))
    }

    async fn typed<T: DeserializeOwned>(&self, collection: Collection) -> Result<T, DomainError> {
        let document = self.raw(collection).await?;
        serde_json::from_value(document).map_err(|e| DomainError::CorruptCollection {
            collection,
            reason: e.to_string(),
        })
    }

    pub async fn profile(&self) -> Result<Profile, DomainError> {
        self.typed(Collection::Profile).await
    }

    pub async fn projects(&self) -> Result<Vec<Project>, DomainError> {
        self.typed(Collection::Projects).await
    }

    pub async fn project(&self, id: &str) -> Result<Project, DomainError> {
        self.projects()
            .await?
            .into_iter()
            .find(|p| p.id == id)
            .ok_or_else(|| DomainError::project_not_found(id))
    }

    pub async fn blogs(&self) -> Result<Vec<BlogPost>, DomainError> {
        self.typed(Collection::Blogs).await
    }

    pub async fn blog(&self, slug: &str) -> Result<BlogPost, DomainError> {
        self.blogs()
            .await?
            .into_iter()
            .find(|b| b.slug == slug)
            .ok_or_else(|| DomainError::blog_not_found(slug))
    }

    pub async fn achievements(&self) -> Result<Vec<Achievement>, DomainError> {
        self.typed(Collection::Achievements).await
    }

    pub async fn search_projects(&self, query: &CatalogQuery) -> Result<Vec<Project>, DomainError> {
        let projects = self.projects().await?;
        Ok(catalog::filter_projects(&projects, query)
            .into_iter()
            .cloned()
            .collect())
    }

    pub async fn search_blogs(&self, query: &CatalogQuery) -> Result<Vec<BlogPost>, DomainError> {
        let blogs = self.blogs().await?;
        Ok(catalog::filter_blogs(&blogs, query)
            .into_iter()
            .cloned()
            .collect())
    }

    pub async fn related_posts(&self, slug: &str) -> Result<Vec<BlogPost>, DomainError> {
        let blogs = self.blogs().await?;
        let post = blogs
            .iter()
            .find(|b| b.slug == slug)
            .ok_or_else(|| DomainError::blog_not_found(slug))?;

        Ok(catalog::related_posts(&blogs, post, RELATED_POSTS_LIMIT)
            .into_iter()
            .cloned()
            .collect())
    }

    pub async fn blog_blocks(&self, slug: &str) -> Result<Vec<ContentBlock>, DomainError> {
        Ok(self.blog(slug).await?.blocks())
    }

    pub async fn achievement_groups(&self) -> Result<Vec<AchievementGroup>, DomainError> {
        Ok(catalog::group_achievements(self.achievements().await?))
    }
}
