//! `DELETE /delete/{file_id}`: remove a Drive file and blank its ledger row.

use axum::extract::{Path, State};
use axum::routing::delete;
use axum::{Json, Router};
use tracing::info;

use crate::error::AppError;
use crate::models::{AppState, DeleteResponse};
use crate::uploads;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/delete/{file_id}", delete(delete_file))
        .with_state(state)
}

async fn delete_file(
    State(state): State<AppState>,
    Path(file_id): Path<String>,
) -> Result<Json<DeleteResponse>, AppError> {
    info!(%file_id, "delete request received");
    uploads::delete_upload(&state, &file_id).await?;
    Ok(Json(DeleteResponse {
        message: "File deleted successfully".to_string(),
    }))
}
