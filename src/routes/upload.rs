//! `POST /upload`: multipart form with a `tabLabel` text field and one or
//! more `files` parts.

use std::path::PathBuf;

use axum::extract::{Multipart, State};
use axum::routing::post;
use axum::{Json, Router};
use tracing::info;

use crate::error::AppError;
use crate::models::{AppState, Category, UploadResponse};
use crate::staging::StagedFile;
use crate::uploads;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/upload", post(upload))
        .with_state(state)
}

async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let staging_dir = PathBuf::from(&state.config.storage.staging_dir);
    let mut category: Option<Category> = None;
    let mut staged: Vec<StagedFile> = Vec::new();

    // Field order is not guaranteed; collect everything, then validate.
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "tabLabel" => {
                let label = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                category = Some(
                    Category::from_label(&label)
                        .ok_or_else(|| AppError::BadRequest(format!("unknown tab label: {label}")))?,
                );
            }
            "files" => {
                let original_name = field.file_name().unwrap_or("upload.bin").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                let file =
                    StagedFile::stage(&staging_dir, "files", &original_name, &content_type, &data)
                        .await
                        .map_err(|e| AppError::Internal(e.to_string()))?;
                staged.push(file);
            }
            _ => {}
        }
    }

    let category =
        category.ok_or_else(|| AppError::BadRequest("missing tabLabel field".to_string()))?;
    if staged.is_empty() {
        return Err(AppError::BadRequest("no files in request".to_string()));
    }

    info!(%category, files = staged.len(), "upload request received");
    let files = uploads::upload_batch(&state, category, staged).await?;
    Ok(Json(UploadResponse { files }))
}
