use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Unexpected response status: {0}")]
    Status(reqwest::StatusCode),

    #[error("{0} not found")]
    NotFound(String),

    #[error("Invalid JSON format: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Save rejected: {0}")]
    Rejected(String),

    #[error("Static data source is read-only")]
    ReadOnly,

    #[error("Settings storage error: {0}")]
    Settings(#[from] std::io::Error),
}
