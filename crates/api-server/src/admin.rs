use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, Path, State},
    response::Json,
};
use domain::Collection;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ApiError;
use crate::AppState;

/// Largest accepted replacement document.
pub const MAX_DOCUMENT_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct AdminResponse {
    pub success: bool,
    pub message: String,
}

/// `PUT /api/admin/:collection`: overwrite a whole collection with the request body.
pub async fn replace_collection(
    State(state): State<AppState>,
    Path(name): Path<String>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<AdminResponse>, ApiError> {
    let collection: Collection = name.parse().map_err(ApiError::Write)?;
    // Oversized bodies land here with 413.
    let body = body?;
    info!("📝 Replacing {} ({} bytes)", collection, body.len());

    let message = state
        .app
        .admin_service
        .replace(collection, &body)
        .await
        .map_err(ApiError::Write)?;

    Ok(Json(AdminResponse {
        success: true,
        message,
    }))
}
