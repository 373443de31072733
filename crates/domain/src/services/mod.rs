pub mod admin_service;
pub mod catalog;
pub mod content_service;

#[cfg(test)]
pub(crate) mod testing;

pub use admin_service::AdminService;
pub use catalog::{AchievementGroup, CatalogQuery, Filter};
pub use content_service::ContentService;
