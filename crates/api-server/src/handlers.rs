use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    response::{IntoResponse, Json, Response},
};
use domain::{AchievementGroup, BlogPost, CatalogQuery, Collection, ContentBlock, DomainError, Filter};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApiError;
use crate::AppState;

/// `?q=` free text and `?filter=` category/tag/status. Either one switches the
/// listing from the stored document to the filtered view.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub q: Option<String>,
    pub filter: Option<String>,
}

impl ListParams {
    pub fn query(&self) -> Option<CatalogQuery> {
        if self.q.is_none() && self.filter.is_none() {
            return None;
        }
        Some(CatalogQuery::new(
            self.q.clone().unwrap_or_default(),
            Filter::parse(self.filter.as_deref().unwrap_or_default()),
        ))
    }
}

#[derive(Debug, Serialize)]
struct RootResponse {
    message: &'static str,
    endpoints: Vec<&'static str>,
}

pub async fn root() -> impl IntoResponse {
    Json(RootResponse {
        message: "Portfolio API",
        endpoints: vec![
            "GET /api/profile",
            "GET /api/projects",
            "GET /api/projects/:id",
            "GET /api/blogs",
            "GET /api/blogs/:slug",
            "GET /api/blogs/:slug/related",
            "GET /api/blogs/:slug/blocks",
            "GET /api/achievements",
            "GET /api/achievements/grouped",
            "GET /api/health",
        ],
    })
}

pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

pub async fn get_profile(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    Ok(Json(state.app.content_service.raw(Collection::Profile).await?))
}

pub async fn list_projects(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(params) = params?;
    let service = &state.app.content_service;
    match params.query() {
        None => Ok(Json(service.raw(Collection::Projects).await?).into_response()),
        Some(query) => Ok(Json(service.search_projects(&query).await?).into_response()),
    }
}

pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    Ok(Json(state.app.content_service.raw_project(&id).await?))
}

pub async fn list_blogs(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(params) = params?;
    let service = &state.app.content_service;
    match params.query() {
        None => Ok(Json(service.raw(Collection::Blogs).await?).into_response()),
        Some(query) => Ok(Json(service.search_blogs(&query).await?).into_response()),
    }
}

pub async fn get_blog(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Value>, ApiError> {
    Ok(Json(state.app.content_service.raw_blog(&slug).await?))
}

pub async fn related_blogs(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Vec<BlogPost>>, ApiError> {
    Ok(Json(state.app.content_service.related_posts(&slug).await?))
}

pub async fn blog_blocks(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Vec<ContentBlock>>, ApiError> {
    Ok(Json(state.app.content_service.blog_blocks(&slug).await?))
}

pub async fn list_achievements(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    Ok(Json(
        state.app.content_service.raw(Collection::Achievements).await?,
    ))
}

pub async fn grouped_achievements(
    State(state): State<AppState>,
) -> Result<Json<Vec<AchievementGroup>>, ApiError> {
    Ok(Json(state.app.content_service.achievement_groups().await?))
}

/// Static deployment layout: `/data/projects.json` and friends, served verbatim.
pub async fn static_document(
    State(state): State<AppState>,
    Path(file): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let collection = Collection::from_file_name(&file).ok_or(DomainError::NotFound {
        kind: "File",
        key: file.clone(),
    })?;
    Ok(Json(state.app.content_service.raw(collection).await?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_params_without_keys_is_raw() {
        assert!(ListParams::default().query().is_none());
    }

    #[test]
    fn test_list_params_build_query() {
        let params = ListParams {
            q: Some("Rust".into()),
            filter: None,
        };
        assert_eq!(params.query(), Some(CatalogQuery::new("Rust", Filter::All)));

        let params = ListParams {
            q: None,
            filter: Some("Planning".into()),
        };
        assert_eq!(
            params.query(),
            Some(CatalogQuery::new("", Filter::Term("Planning".into())))
        );
    }
}
