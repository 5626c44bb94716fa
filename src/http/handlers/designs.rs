//! Design handlers: public listing plus admin create/delete.

use axum::http::{HeaderMap, StatusCode};
use axum::{
    Json,
    extract::{Multipart, Path, State},
};

use super::super::auth::require_admin;
use super::super::types::MessageResponse;
use super::super::{AppError, AppState, metrics};
use crate::media::MediaUpload;
use crate::model::{Design, DesignDraft};

/// GET /api/designs - List all designs.
pub(crate) async fn list_designs(
    State(state): State<AppState>,
) -> Result<Json<Vec<Design>>, AppError> {
    metrics::record_design_operation("list");
    Ok(Json(state.designs.list().await?))
}

/// POST /api/admin/designs - Create a design from a multipart form.
///
/// Text fields: `title` (required), `description`, `category`,
/// `mediaType` (hint only). File field: `media` (required).
pub(crate) async fn create_design(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<Design>), AppError> {
    require_admin(&state, &headers, "/api/admin/designs").await?;
    metrics::record_design_operation("create");

    let mut draft = DesignDraft::default();
    let mut upload: Option<MediaUpload> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| AppError::BadRequest(format!("Invalid multipart body: {err}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "title" => draft.title = read_text(field, "title").await?,
            "description" => draft.description = Some(read_text(field, "description").await?),
            "category" => draft.category = Some(read_text(field, "category").await?),
            "mediaType" => draft.media_type = Some(read_text(field, "mediaType").await?),
            "media" => {
                let original_file_name = field.file_name().unwrap_or("upload").to_string();
                let content_type = field.content_type().map(str::to_string);
                let data = field.bytes().await.map_err(|err| {
                    AppError::BadRequest(format!("Failed to read media field: {err}"))
                })?;
                upload = Some(MediaUpload {
                    original_file_name,
                    content_type,
                    data,
                });
            }
            _ => {}
        }
    }

    if draft.title.trim().is_empty() {
        return Err(AppError::BadRequest("Title is a required field.".to_string()));
    }
    let upload =
        upload.ok_or_else(|| AppError::BadRequest("Media file is required.".to_string()))?;

    let design = state.designs.create(draft, upload).await?;
    Ok((StatusCode::CREATED, Json(design)))
}

/// DELETE /api/admin/designs/{id} - Delete a design and schedule media
/// cleanup.
pub(crate) async fn delete_design(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    require_admin(&state, &headers, "/api/admin/designs/{id}").await?;
    metrics::record_design_operation("delete");

    state.designs.delete(&id).await?;
    Ok(Json(MessageResponse {
        message: "Design removed.",
    }))
}

async fn read_text(
    field: axum::extract::multipart::Field<'_>,
    name: &'static str,
) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|err| AppError::BadRequest(format!("Failed to read {name} field: {err}")))
}
