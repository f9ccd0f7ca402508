//! Upload and delete orchestration.
//!
//! An upload batch resolves the category folder once, then handles each file
//! strictly in input order: Drive write, local unstage, ledger append. A
//! failure on any file aborts the remainder of the batch; files already
//! pushed to Drive stay there, unrecorded failures and all. A delete reads
//! the view link from metadata first (it disappears with the file), removes
//! the Drive file, then blanks the matching ledger row.

use bytes::Bytes;
use tracing::{error, info};

use crate::error::AppError;
use crate::google::drive::DriveClient;
use crate::models::{AppState, Category, UploadedFile};
use crate::staging::StagedFile;

pub async fn upload_batch(
    state: &AppState,
    category: Category,
    staged: Vec<StagedFile>,
) -> Result<Vec<UploadedFile>, AppError> {
    let folder_id = state
        .folders
        .resolve(category)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    info!(%category, %folder_id, files = staged.len(), "starting upload batch");

    let mut uploaded = Vec::with_capacity(staged.len());
    for file in &staged {
        let data = tokio::fs::read(&file.path)
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?;

        let id = state
            .drive
            .upload_file(
                &folder_id,
                &file.original_name,
                &file.content_type,
                Bytes::from(data),
            )
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?;

        // The remote copy is durable; the staged copy can go.
        file.remove()
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?;

        let link = DriveClient::view_link(&id);
        state
            .ledger
            .append_link(&link)
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?;

        uploaded.push(UploadedFile {
            id,
            web_view_link: link,
        });
    }

    info!(%category, uploaded = uploaded.len(), "upload batch complete");
    Ok(uploaded)
}

pub async fn delete_upload(state: &AppState, file_id: &str) -> Result<(), AppError> {
    // Must happen before deletion; the metadata is gone afterwards.
    let link = state
        .drive
        .web_view_link(file_id)
        .await
        .map_err(|e| AppError::Delete(e.to_string()))?;

    state
        .drive
        .delete_file(file_id)
        .await
        .map_err(|e| AppError::Delete(e.to_string()))?;

    if let Err(e) = state.ledger.remove_link(&link).await {
        // The file is gone but its row survives. Nothing reconciles this
        // later, so make the inconsistency loud in the logs.
        error!(%file_id, %link, error = %e, "drive file deleted but ledger row not removed");
        return Err(AppError::Delete(e.to_string()));
    }

    info!(%file_id, "deleted file and ledger row");
    Ok(())
}
