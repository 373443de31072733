use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::DomainError;

/// One of the four JSON documents backing the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Profile,
    Projects,
    Blogs,
    Achievements,
}

impl Collection {
    pub const ALL: [Collection; 4] = [
        Collection::Profile,
        Collection::Projects,
        Collection::Blogs,
        Collection::Achievements,
    ];

    /// File stem in the data directory and path segment in the API.
    pub fn name(&self) -> &'static str {
        match self {
            Collection::Profile => "profile",
            Collection::Projects => "projects",
            Collection::Blogs => "blogs",
            Collection::Achievements => "achievements",
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.json", self.name())
    }

    pub fn label(&self) -> &'static str {
        match self {
            Collection::Profile => "Profile",
            Collection::Projects => "Projects",
            Collection::Blogs => "Blogs",
            Collection::Achievements => "Achievements",
        }
    }

    /// Resolves `projects.json` style file names used by the static deployment.
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let stem = file_name.strip_suffix(".json")?;
        stem.parse().ok()
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Collection {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Collection::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| DomainError::NotFound {
                kind: "Collection",
                key: s.to_string(),
            })
    }
}
