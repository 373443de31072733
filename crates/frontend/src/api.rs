use domain::{Achievement, BlogPost, Collection, Profile, Project};
use reqwest::{Client, IntoUrl, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use tracing::debug;

use crate::error::ClientError;

/// Where collection documents come from.
///
/// `Api` talks to the content service. `Static` reads the plain `<name>.json` files of
/// a static deployment, where single-record lookups scan the whole collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Api { base_url: String },
    Static { base_url: String },
}

impl DataSource {
    /// Production builds read the static files, development builds the live API.
    pub fn for_build(production: bool, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        if production {
            DataSource::Static { base_url }
        } else {
            DataSource::Api { base_url }
        }
    }

    fn base(&self) -> &str {
        match self {
            DataSource::Api { base_url } | DataSource::Static { base_url } => {
                base_url.trim_end_matches('/')
            }
        }
    }

    pub fn collection_url(&self, collection: Collection) -> String {
        match self {
            DataSource::Api { .. } => format!("{}/api/{}", self.base(), collection.name()),
            DataSource::Static { .. } => {
                format!("{}/data/{}", self.base(), collection.file_name())
            }
        }
    }

    /// Single-record URL with `key` as one percent-encoded path segment.
    /// `None` for the static layout, which has no per-record files.
    fn item_url(&self, collection: Collection, key: &str) -> Result<Option<Url>, ClientError> {
        if let DataSource::Static { .. } = self {
            return Ok(None);
        }

        let base = self.collection_url(collection);
        let mut url =
            Url::parse(&base).map_err(|e| ClientError::InvalidUrl(format!("{}: {}", base, e)))?;
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(base.clone()))?
            .push(key);
        Ok(Some(url))
    }

    fn admin_url(&self, collection: Collection) -> Option<String> {
        match self {
            DataSource::Api { .. } => {
                Some(format!("{}/api/admin/{}", self.base(), collection.name()))
            }
            DataSource::Static { .. } => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct AdminReply {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    message: String,
}

/// Typed access to the four collections. Nothing is cached; call again to reload.
#[derive(Debug, Clone)]
pub struct PortfolioClient {
    http: Client,
    source: DataSource,
}

impl PortfolioClient {
    pub fn new(source: DataSource) -> Self {
        Self::with_client(Client::new(), source)
    }

    pub fn with_client(http: Client, source: DataSource) -> Self {
        Self { http, source }
    }

    async fn get_json<T, U>(&self, url: U, what: &str) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        U: IntoUrl + fmt::Display,
    {
        debug!("GET {}", url);
        let response = self.http.get(url).send().await?;
        match response.status() {
            status if status.is_success() => Ok(response.json().await?),
            StatusCode::NOT_FOUND => Err(ClientError::NotFound(what.to_string())),
            status => Err(ClientError::Status(status)),
        }
    }

    /// The collection document as JSON, without decoding into entities.
    pub async fn fetch_raw(&self, collection: Collection) -> Result<Value, ClientError> {
        self.fetch(collection).await
    }

    async fn fetch<T: DeserializeOwned>(&self, collection: Collection) -> Result<T, ClientError> {
        self.get_json(self.source.collection_url(collection), collection.label())
            .await
    }

    pub async fn fetch_profile(&self) -> Result<Profile, ClientError> {
        self.fetch(Collection::Profile).await
    }

    pub async fn fetch_projects(&self) -> Result<Vec<Project>, ClientError> {
        self.fetch(Collection::Projects).await
    }

    pub async fn fetch_project(&self, id: &str) -> Result<Project, ClientError> {
        match self.source.item_url(Collection::Projects, id)? {
            Some(url) => self.get_json(url, "Project").await,
            None => self
                .fetch_projects()
                .await?
                .into_iter()
                .find(|p| p.id == id)
                .ok_or_else(|| ClientError::NotFound("Project".to_string())),
        }
    }

    pub async fn fetch_blogs(&self) -> Result<Vec<BlogPost>, ClientError> {
        self.fetch(Collection::Blogs).await
    }

    pub async fn fetch_blog(&self, slug: &str) -> Result<BlogPost, ClientError> {
        match self.source.item_url(Collection::Blogs, slug)? {
            Some(url) => self.get_json(url, "Blog").await,
            None => self
                .fetch_blogs()
                .await?
                .into_iter()
                .find(|b| b.slug == slug)
                .ok_or_else(|| ClientError::NotFound("Blog".to_string())),
        }
    }

    pub async fn fetch_achievements(&self) -> Result<Vec<Achievement>, ClientError> {
        self.fetch(Collection::Achievements).await
    }

    /// Replaces a collection on the server. Returns the server's confirmation.
    pub async fn replace_collection(
        &self,
        collection: Collection,
        document: &Value,
    ) -> Result<String, ClientError> {
        let url = self
            .source
            .admin_url(collection)
            .ok_or(ClientError::ReadOnly)?;

        debug!("PUT {}", url);
        let response = self.http.put(&url).json(document).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound(format!("Admin endpoint for {}", collection)));
        }

        let reply: AdminReply = response.json().await?;
        if status.is_success() && reply.success {
            Ok(reply.message)
        } else if reply.message.is_empty() {
            Err(ClientError::Rejected("Failed to save".to_string()))
        } else {
            Err(ClientError::Rejected(reply.message))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_urls_per_source() {
        let api = DataSource::for_build(false, "http://localhost:5000/");
        assert_eq!(
            api.collection_url(Collection::Projects),
            "http://localhost:5000/api/projects"
        );
        assert_eq!(
            api.item_url(Collection::Blogs, "hello").unwrap().map(String::from),
            Some("http://localhost:5000/api/blogs/hello".to_string())
        );
        assert_eq!(
            api.item_url(Collection::Blogs, "c#/x?y").unwrap().map(String::from),
            Some("http://localhost:5000/api/blogs/c%23%2Fx%3Fy".to_string())
        );
        assert_eq!(
            api.admin_url(Collection::Profile).as_deref(),
            Some("http://localhost:5000/api/admin/profile")
        );

        let static_site = DataSource::for_build(true, "https://example.org");
        assert_eq!(
            static_site.collection_url(Collection::Achievements),
            "https://example.org/data/achievements.json"
        );
        assert_eq!(static_site.item_url(Collection::Blogs, "hello").unwrap(), None);
        assert_eq!(static_site.admin_url(Collection::Blogs), None);
    }
}
