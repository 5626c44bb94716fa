//! Serving stored media files.

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};

use super::super::{AppError, AppState};

/// GET /uploads/{filename} - Serve a stored media file.
///
/// Looks in the writable uploads root first, then the read-only origin in
/// ephemeral deployments.
pub(crate) async fn serve_upload(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response, AppError> {
    match state.media.open(&filename).await? {
        Some((bytes, content_type)) => {
            Ok(([(header::CONTENT_TYPE, content_type)], bytes).into_response())
        }
        None => Err(AppError::NotFound("File not found.".to_string())),
    }
}
