//! View state behind the project and blog listing pages: the loaded collection,
//! the current search text and filter, and everything derived from them.

use domain::catalog::{self, BlogFacets, ProjectFacets};
use domain::{BlogPost, CatalogQuery, Filter, Project};
use std::fmt;

use crate::api::PortfolioClient;
use crate::error::ClientError;

const QUICK_FILTERS: usize = 5;
const FILTER_OPTIONS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultSummary {
    pub shown: usize,
    pub total: usize,
    pub noun: &'static str,
}

impl fmt::Display for ResultSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Showing {} of {} {}", self.shown, self.total, self.noun)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProjectBrowser {
    projects: Vec<Project>,
    query: CatalogQuery,
}

impl ProjectBrowser {
    pub fn new(projects: Vec<Project>) -> Self {
        Self {
            projects,
            query: CatalogQuery::default(),
        }
    }

    pub async fn load(client: &PortfolioClient) -> Result<Self, ClientError> {
        Ok(Self::new(client.fetch_projects().await?))
    }

    pub fn query(&self) -> &CatalogQuery {
        &self.query
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.query.search = search.into();
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.query.filter = filter;
    }

    pub fn reset(&mut self) {
        self.query = CatalogQuery::default();
    }

    pub fn visible(&self) -> Vec<&Project> {
        catalog::filter_projects(&self.projects, &self.query)
    }

    pub fn facets(&self) -> ProjectFacets {
        catalog::project_facets(&self.projects)
    }

    /// Entries of the filter dropdown: project types, capped.
    pub fn filter_options(&self) -> Vec<String> {
        let mut types = self.facets().project_types;
        types.truncate(FILTER_OPTIONS);
        types
    }

    pub fn summary(&self) -> ResultSummary {
        ResultSummary {
            shown: self.visible().len(),
            total: self.projects.len(),
            noun: "projects",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct BlogBrowser {
    posts: Vec<BlogPost>,
    query: CatalogQuery,
}

impl BlogBrowser {
    pub fn new(posts: Vec<BlogPost>) -> Self {
        Self {
            posts,
            query: CatalogQuery::default(),
        }
    }

    pub async fn load(client: &PortfolioClient) -> Result<Self, ClientError> {
        Ok(Self::new(client.fetch_blogs().await?))
    }

    pub fn query(&self) -> &CatalogQuery {
        &self.query
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.query.search = search.into();
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.query.filter = filter;
    }

    /// Quick-filter chip: selecting the active category clears it.
    pub fn toggle_filter(&mut self, term: &str) {
        self.query.filter = self.query.filter.toggled(term);
    }

    pub fn reset(&mut self) {
        self.query = CatalogQuery::default();
    }

    /// Matching posts, newest first.
    pub fn visible(&self) -> Vec<&BlogPost> {
        catalog::filter_blogs(&self.posts, &self.query)
    }

    /// Featured hero post, only on the unfiltered listing.
    pub fn hero(&self) -> Option<&BlogPost> {
        let visible = self.visible();
        catalog::split_featured(&visible).hero(&self.query)
    }

    /// Posts for the grid. The unfiltered listing leaves featured posts to the hero slot.
    pub fn grid(&self) -> Vec<&BlogPost> {
        let visible = self.visible();
        if self.query.is_identity() {
            catalog::split_featured(&visible).regular
        } else {
            visible
        }
    }

    pub fn facets(&self) -> BlogFacets {
        catalog::blog_facets(&self.posts)
    }

    pub fn quick_filters(&self) -> Vec<String> {
        let mut categories = self.facets().categories;
        categories.truncate(QUICK_FILTERS);
        categories
    }

    /// Dropdown entries: every category, then the first tags.
    pub fn filter_options(&self) -> Vec<String> {
        let BlogFacets { mut categories, tags } = self.facets();
        categories.extend(tags.into_iter().take(FILTER_OPTIONS));
        categories
    }

    pub fn summary(&self) -> ResultSummary {
        ResultSummary {
            shown: self.visible().len(),
            total: self.posts.len(),
            noun: "articles",
        }
    }
}
