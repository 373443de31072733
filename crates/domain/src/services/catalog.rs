//! Filtering, search and derived views over the project and blog collections.
//!
//! Everything here is a pure function over slices that the caller already loaded,
//! so the same predicates back the API query parameters and the client browsers.

use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::HashSet;

use crate::entities::{Achievement, BlogPost, Project};

/// Category/tag/status selector. `All` is the identity filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Filter {
    #[default]
    All,
    Term(String),
}

impl Filter {
    /// Terms are compared exactly, whitespace included.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "" | "all" => Filter::All,
            term => Filter::Term(term.to_string()),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Filter::All)
    }

    pub fn term(&self) -> Option<&str> {
        match self {
            Filter::All => None,
            Filter::Term(term) => Some(term),
        }
    }

    /// Clicking an active quick filter clears it again.
    pub fn toggled(&self, term: &str) -> Filter {
        match self {
            Filter::Term(current) if current == term => Filter::All,
            _ => Filter::parse(term),
        }
    }
}

impl From<String> for Filter {
    fn from(raw: String) -> Self {
        Filter::parse(&raw)
    }
}

impl From<Filter> for String {
    fn from(filter: Filter) -> Self {
        match filter {
            Filter::All => "all".to_string(),
            Filter::Term(term) => term,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogQuery {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub filter: Filter,
}

impl CatalogQuery {
    pub fn new(search: impl Into<String>, filter: Filter) -> Self {
        Self {
            search: search.into(),
            filter,
        }
    }

    pub fn is_identity(&self) -> bool {
        self.search.is_empty() && self.filter.is_all()
    }

    fn needle(&self) -> Option<String> {
        (!self.search.is_empty()).then(|| self.search.to_lowercase())
    }
}

fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

fn project_matches(project: &Project, query: &CatalogQuery, needle: Option<&str>) -> bool {
    let matches_filter = match query.filter.term() {
        None => true,
        Some(term) => project.status.as_str() == term || project.has_type(term),
    };

    let matches_search = match needle {
        None => true,
        Some(needle) => {
            contains_folded(&project.title, needle)
                || contains_folded(&project.short_description, needle)
                || project.project_type.iter().any(|t| contains_folded(t, needle))
        }
    };

    matches_filter && matches_search
}

fn blog_matches(post: &BlogPost, query: &CatalogQuery, needle: Option<&str>) -> bool {
    let matches_filter = match query.filter.term() {
        None => true,
        Some(term) => post.category == term || post.has_tag(term),
    };

    let matches_search = match needle {
        None => true,
        Some(needle) => {
            contains_folded(&post.title, needle)
                || contains_folded(&post.excerpt, needle)
                || post.tags.iter().any(|t| contains_folded(t, needle))
        }
    };

    matches_filter && matches_search
}

/// Projects matching the query, in collection order.
pub fn filter_projects<'a>(projects: &'a [Project], query: &CatalogQuery) -> Vec<&'a Project> {
    let needle = query.needle();
    projects
        .iter()
        .filter(|p| project_matches(p, query, needle.as_deref()))
        .collect()
}

/// Posts matching the query, newest first.
pub fn filter_blogs<'a>(posts: &'a [BlogPost], query: &CatalogQuery) -> Vec<&'a BlogPost> {
    let needle = query.needle();
    let mut matched: Vec<&BlogPost> = posts
        .iter()
        .filter(|p| blog_matches(p, query, needle.as_deref()))
        .collect();
    sort_newest_first(&mut matched);
    matched
}

/// Stable sort by date descending. Posts without a readable date go last.
pub fn sort_newest_first(posts: &mut [&BlogPost]) {
    posts.sort_by_key(|p| Reverse(p.published_on()));
}

fn unique_in_order<'a>(values: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .into_iter()
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogFacets {
    pub categories: Vec<String>,
    pub tags: Vec<String>,
}

pub fn blog_facets(posts: &[BlogPost]) -> BlogFacets {
    BlogFacets {
        categories: unique_in_order(posts.iter().map(|p| p.category.as_str())),
        tags: unique_in_order(posts.iter().flat_map(|p| p.tags.iter().map(String::as_str))),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectFacets {
    pub statuses: Vec<String>,
    pub project_types: Vec<String>,
}

pub fn project_facets(projects: &[Project]) -> ProjectFacets {
    ProjectFacets {
        statuses: unique_in_order(projects.iter().map(|p| p.status.as_str())),
        project_types: unique_in_order(
            projects
                .iter()
                .flat_map(|p| p.project_type.iter().map(String::as_str)),
        ),
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeaturedSplit<'a> {
    pub featured: Vec<&'a BlogPost>,
    pub regular: Vec<&'a BlogPost>,
}

impl<'a> FeaturedSplit<'a> {
    /// The single hero post. Only shown on the unfiltered listing.
    pub fn hero(&self, query: &CatalogQuery) -> Option<&'a BlogPost> {
        if query.is_identity() {
            self.featured.first().copied()
        } else {
            None
        }
    }
}

pub fn split_featured<'a>(posts: &[&'a BlogPost]) -> FeaturedSplit<'a> {
    let (featured, regular): (Vec<&BlogPost>, Vec<&BlogPost>) =
        posts.iter().copied().partition(|p| p.featured);
    FeaturedSplit { featured, regular }
}

/// Posts sharing a category or tag with `post`, in collection order.
pub fn related_posts<'a>(
    posts: &'a [BlogPost],
    post: &BlogPost,
    limit: usize,
) -> Vec<&'a BlogPost> {
    posts
        .iter()
        .filter(|other| post.is_related_to(other))
        .take(limit)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AchievementGroup {
    pub category: String,
    pub items: Vec<Achievement>,
}

/// Groups achievements by category; groups keep first-seen order.
pub fn group_achievements(achievements: Vec<Achievement>) -> Vec<AchievementGroup> {
    let mut groups: Vec<AchievementGroup> = Vec::new();
    for achievement in achievements {
        match groups.iter_mut().find(|g| g.category == achievement.category) {
            Some(group) => group.items.push(achievement),
            None => groups.push(AchievementGroup {
                category: achievement.category.clone(),
                items: vec![achievement],
            }),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::ProjectStatus;
    use serde_json::json;

    fn project(id: &str, status: &str, types: &[&str], title: &str) -> Project {
        serde_json::from_value(json!({
            "id": id,
            "title": title,
            "status": status,
            "shortDescription": format!("{title} summary"),
            "projectType": types
        }))
        .unwrap()
    }

    fn blog(slug: &str, date: &str, category: &str, tags: &[&str], featured: bool) -> BlogPost {
        serde_json::from_value(json!({
            "slug": slug,
            "title": format!("Post {slug}"),
            "excerpt": format!("About {category}"),
            "category": category,
            "tags": tags,
            "date": date,
            "featured": featured
        }))
        .unwrap()
    }

    fn slugs(posts: &[&BlogPost]) -> Vec<String> {
        posts.iter().map(|p| p.slug.clone()).collect()
    }

    fn ids(projects: &[&Project]) -> Vec<String> {
        projects.iter().map(|p| p.id.clone()).collect()
    }

    #[test]
    fn test_filter_parse() {
        assert_eq!(Filter::parse(""), Filter::All);
        assert_eq!(Filter::parse("all"), Filter::All);
        assert_eq!(Filter::parse("Rust"), Filter::Term("Rust".into()));
        assert_eq!(Filter::parse(" all"), Filter::Term(" all".into()));
        assert_eq!(Filter::Term("AI".into()).toggled("AI"), Filter::All);
        assert_eq!(Filter::All.toggled("AI"), Filter::Term("AI".into()));
    }

    #[test]
    fn test_identity_query_keeps_project_order() {
        let projects = vec![
            project("p2", "Planning", &[], "Zeta"),
            project("p1", "Shipped", &[], "Alpha"),
        ];
        let result = filter_projects(&projects, &CatalogQuery::default());
        assert_eq!(ids(&result), vec!["p2", "p1"]);
    }

    #[test]
    fn test_filter_projects_by_status() {
        let projects = vec![
            project("p1", "Shipped", &[], "One"),
            project("p2", "Planning", &[], "Two"),
        ];
        let query = CatalogQuery::new("", Filter::parse("Planning"));
        let result = filter_projects(&projects, &query);
        assert_eq!(ids(&result), vec!["p2"]);
        assert_eq!(result[0].status, ProjectStatus::Planning);
    }

    #[test]
    fn test_filter_projects_by_type_and_search() {
        let projects = vec![
            project("p1", "Shipped", &["Platform", "AI"], "Search engine"),
            project("p2", "Shipped", &["AI"], "Chat bot"),
            project("p3", "Shipped", &["Mobile"], "Engine tuning"),
        ];

        let by_type = filter_projects(&projects, &CatalogQuery::new("", Filter::parse("AI")));
        assert_eq!(ids(&by_type), vec!["p1", "p2"]);

        let by_search = filter_projects(&projects, &CatalogQuery::new("ENGINE", Filter::All));
        assert_eq!(ids(&by_search), vec!["p1", "p3"]);

        let both = filter_projects(&projects, &CatalogQuery::new("engine", Filter::parse("AI")));
        assert_eq!(ids(&both), vec!["p1"]);

        let via_type_text = filter_projects(&projects, &CatalogQuery::new("mobi", Filter::All));
        assert_eq!(ids(&via_type_text), vec!["p3"]);
    }

    #[test]
    fn test_blogs_sorted_newest_first_without_filter() {
        let posts = vec![
            blog("old", "2023-01-01", "Tech", &[], false),
            blog("new", "2024-01-01", "Tech", &[], false),
        ];
        let result = filter_blogs(&posts, &CatalogQuery::default());
        assert_eq!(slugs(&result), vec!["new", "old"]);
    }

    #[test]
    fn test_filter_blogs_by_tag() {
        let posts = vec![
            blog("a", "2022-05-01", "Tech", &["rust"], false),
            blog("b", "2024-05-01", "Life", &["travel"], false),
            blog("c", "2023-05-01", "Life", &["rust", "travel"], false),
        ];
        let result = filter_blogs(&posts, &CatalogQuery::new("", Filter::parse("rust")));
        assert_eq!(slugs(&result), vec!["c", "a"]);
        assert!(result.iter().all(|p| p.has_tag("rust")));
    }

    #[test]
    fn test_filter_blogs_by_category_and_search() {
        let posts = vec![
            blog("a", "2022-05-01", "Tech", &["rust"], false),
            blog("b", "2024-05-01", "Life", &["travel"], false),
        ];
        let by_category = filter_blogs(&posts, &CatalogQuery::new("", Filter::parse("Life")));
        assert_eq!(slugs(&by_category), vec!["b"]);

        let padded = filter_blogs(&posts, &CatalogQuery::new("", Filter::parse("Life ")));
        assert!(padded.is_empty());

        let by_excerpt = filter_blogs(&posts, &CatalogQuery::new("about tech", Filter::All));
        assert_eq!(slugs(&by_excerpt), vec!["a"]);

        let none = filter_blogs(&posts, &CatalogQuery::new("kubernetes", Filter::All));
        assert!(none.is_empty());
    }

    #[test]
    fn test_undated_posts_sort_last_and_stay_stable() {
        let posts = vec![
            blog("x", "someday", "Tech", &[], false),
            blog("a", "2021-01-01", "Tech", &[], false),
            blog("y", "", "Tech", &[], false),
            blog("b", "2022-01-01", "Tech", &[], false),
        ];
        let result = filter_blogs(&posts, &CatalogQuery::default());
        assert_eq!(slugs(&result), vec!["b", "a", "x", "y"]);
    }

    #[test]
    fn test_facets_are_unique_in_first_seen_order() {
        let posts = vec![
            blog("a", "2022-01-01", "Tech", &["rust", "web"], false),
            blog("b", "2022-01-02", "Life", &["web"], false),
            blog("c", "2022-01-03", "Tech", &["go"], false),
        ];
        let facets = blog_facets(&posts);
        assert_eq!(facets.categories, vec!["Tech", "Life"]);
        assert_eq!(facets.tags, vec!["rust", "web", "go"]);

        let projects = vec![
            project("p1", "Shipped", &["AI"], "One"),
            project("p2", "Planning", &["AI", "Web"], "Two"),
        ];
        let facets = project_facets(&projects);
        assert_eq!(facets.statuses, vec!["Shipped", "Planning"]);
        assert_eq!(facets.project_types, vec!["AI", "Web"]);
    }

    #[test]
    fn test_featured_hero_only_on_identity_query() {
        let posts = vec![
            blog("a", "2022-01-01", "Tech", &[], true),
            blog("b", "2023-01-01", "Tech", &[], false),
        ];
        let query = CatalogQuery::default();
        let filtered = filter_blogs(&posts, &query);
        let split = split_featured(&filtered);
        assert_eq!(slugs(&split.featured), vec!["a"]);
        assert_eq!(slugs(&split.regular), vec!["b"]);
        assert_eq!(split.hero(&query).map(|p| p.slug.as_str()), Some("a"));

        let searching = CatalogQuery::new("post", Filter::All);
        assert!(split.hero(&searching).is_none());
    }

    #[test]
    fn test_related_posts_excludes_self_and_caps() {
        let posts = vec![
            blog("main", "2022-01-01", "Tech", &["rust"], false),
            blog("r1", "2022-01-02", "Tech", &[], false),
            blog("r2", "2022-01-03", "Life", &["rust"], false),
            blog("no", "2022-01-04", "Life", &["go"], false),
            blog("r3", "2022-01-05", "Tech", &[], false),
            blog("r4", "2022-01-06", "Tech", &[], false),
        ];
        let related = related_posts(&posts, &posts[0], 3);
        assert_eq!(slugs(&related), vec!["r1", "r2", "r3"]);
    }

    #[test]
    fn test_group_achievements_by_category() {
        let achievements: Vec<Achievement> = serde_json::from_value(json!([
            { "id": 1, "category": "Awards", "title": "A" },
            { "id": 2, "category": "Talks", "title": "B" },
            { "id": 3, "category": "Awards", "title": "C" }
        ]))
        .unwrap();

        let groups = group_achievements(achievements);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].category, "Awards");
        assert_eq!(
            groups[0].items.iter().map(|a| a.title.as_str()).collect::<Vec<_>>(),
            vec!["A", "C"]
        );
        assert_eq!(groups[1].category, "Talks");
    }
}
