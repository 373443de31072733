//! Client side of the portfolio: typed fetching from the API or a static deployment,
//! listing state for the browse pages, persisted preferences and the raw JSON editor.

pub mod admin;
pub mod api;
pub mod browser;
pub mod error;
pub mod settings;

pub use admin::AdminEditor;
pub use api::{DataSource, PortfolioClient};
pub use browser::{BlogBrowser, ProjectBrowser, ResultSummary};
pub use error::ClientError;
pub use settings::{AppSettings, JsonFileStore, KeyValueStore, MemoryStore, Theme};
