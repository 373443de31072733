use axum::{
    extract::rejection::{BytesRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain::DomainError;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// Handler error. Read and admin routes answer in different shapes:
/// reads with `{error}`, admin writes with `{success, message}`.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Read(DomainError),

    #[error("{0}")]
    Write(DomainError),

    #[error("Invalid query: {0}")]
    Query(QueryRejection),

    #[error("Invalid body: {0}")]
    Body(BytesRejection),
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError::Read(err)
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Query(rejection)
    }
}

impl From<BytesRejection> for ApiError {
    fn from(rejection: BytesRejection) -> Self {
        ApiError::Body(rejection)
    }
}

fn domain_status(err: &DomainError) -> StatusCode {
    match err {
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::MalformedInput(_) => StatusCode::BAD_REQUEST,
        DomainError::IoFailure(_) | DomainError::CorruptCollection { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn domain_message(err: &DomainError) -> String {
    match err {
        DomainError::NotFound { kind, .. } => format!("{kind} not found"),
        other => other.to_string(),
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Read(e) | ApiError::Write(e) => domain_status(e),
            ApiError::Query(rejection) => rejection.status(),
            ApiError::Body(rejection) => rejection.status(),
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::Read(e) | ApiError::Write(e) => domain_message(e),
            ApiError::Query(rejection) => rejection.body_text(),
            ApiError::Body(rejection) => rejection.body_text(),
        }
    }

    fn is_write(&self) -> bool {
        matches!(self, ApiError::Write(_) | ApiError::Body(_))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("❌ {}", self);
        } else {
            warn!("{}", self);
        }

        let body = if self.is_write() {
            json!({ "success": false, "message": self.message() })
        } else {
            json!({ "error": self.message() })
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::Collection;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::from(DomainError::project_not_found("x")).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Write(DomainError::MalformedInput("eof".into())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(DomainError::CorruptCollection {
                collection: Collection::Blogs,
                reason: "eof".into()
            })
            .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_not_found_message_names_the_kind() {
        let err = ApiError::from(DomainError::blog_not_found("missing"));
        assert_eq!(err.message(), "Blog not found");
    }
}
