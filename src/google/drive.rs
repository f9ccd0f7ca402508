//! Google Drive v3 REST client.
//!
//! Covers exactly the surface the upload flow needs: folder lookup and
//! creation under one parent, multipart file upload, metadata lookup for the
//! browser view link, and file deletion. Base URLs are injected so tests can
//! point the client at a local mock server.

use std::sync::Arc;

use bytes::Bytes;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::google::auth::{AuthError, TokenProvider};

pub const FOLDER_MIME_TYPE: &str = "application/vnd.google-apps.folder";

/// OAuth scope for full Drive access, as the original service account used.
pub const DRIVE_SCOPE: &str = "https://www.googleapis.com/auth/drive";

#[derive(Debug, Error)]
pub enum DriveError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("drive request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("drive returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("drive response missing field {0}")]
    MissingField(&'static str),
}

#[derive(Debug, Deserialize)]
struct FileList {
    #[serde(default)]
    files: Vec<FileRef>,
}

#[derive(Debug, Deserialize)]
struct FileRef {
    id: String,
}

#[derive(Debug, Deserialize)]
struct CreatedFile {
    id: String,
}

#[derive(Debug, Deserialize)]
struct FileMetadata {
    #[serde(rename = "webViewLink")]
    web_view_link: Option<String>,
}

pub struct DriveClient {
    http: reqwest::Client,
    api_base: String,
    upload_base: String,
    auth: Arc<TokenProvider>,
}

impl DriveClient {
    pub fn new(api_base: String, upload_base: String, auth: Arc<TokenProvider>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base,
            upload_base,
            auth,
        }
    }

    /// Browser view link for a file id. The exact template matters: ledger
    /// rows written by earlier deployments use this form, and removal matches
    /// on the full string.
    pub fn view_link(file_id: &str) -> String {
        format!("https://drive.google.com/file/d/{file_id}/view?usp=drive_link")
    }

    /// First folder with this exact name under the parent, if any. No
    /// tie-break beyond "first returned by Drive".
    pub async fn find_folder(
        &self,
        name: &str,
        parent_id: &str,
    ) -> Result<Option<String>, DriveError> {
        let query = format!(
            "mimeType='{FOLDER_MIME_TYPE}' and name='{name}' and '{parent_id}' in parents"
        );
        let token = self.auth.token().await?;
        let response = self
            .http
            .get(format!("{}/files", self.api_base))
            .bearer_auth(token)
            .query(&[
                ("q", query.as_str()),
                ("fields", "files(id, name)"),
                ("spaces", "drive"),
            ])
            .send()
            .await?;
        let response = check(response).await?;
        let list: FileList = response.json().await?;
        Ok(list.files.into_iter().next().map(|f| f.id))
    }

    pub async fn create_folder(&self, name: &str, parent_id: &str) -> Result<String, DriveError> {
        let token = self.auth.token().await?;
        let response = self
            .http
            .post(format!("{}/files", self.api_base))
            .bearer_auth(token)
            .query(&[("fields", "id")])
            .json(&serde_json::json!({
                "name": name,
                "mimeType": FOLDER_MIME_TYPE,
                "parents": [parent_id],
            }))
            .send()
            .await?;
        let response = check(response).await?;
        let created: CreatedFile = response.json().await?;
        info!(folder = %name, id = %created.id, "created drive folder");
        Ok(created.id)
    }

    /// Upload one file into a folder, returning the new file's id. Uses the
    /// multipart/related upload endpoint: a JSON metadata part (name, type,
    /// parent) followed by the media bytes.
    pub async fn upload_file(
        &self,
        folder_id: &str,
        filename: &str,
        content_type: &str,
        data: Bytes,
    ) -> Result<String, DriveError> {
        let metadata = serde_json::json!({
            "name": filename,
            "mimeType": content_type,
            "parents": [folder_id],
        });

        let boundary = format!("tabdrive-{}", uuid::Uuid::new_v4());
        let mut body: Vec<u8> = Vec::with_capacity(data.len() + 512);
        body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        body.extend_from_slice(b"Content-Type: application/json; charset=UTF-8\r\n\r\n");
        body.extend_from_slice(metadata.to_string().as_bytes());
        body.extend_from_slice(format!("\r\n--{boundary}\r\n").as_bytes());
        body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
        body.extend_from_slice(&data);
        body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

        debug!(%filename, bytes = data.len(), "uploading to drive");

        let token = self.auth.token().await?;
        let response = self
            .http
            .post(format!("{}/files", self.upload_base))
            .bearer_auth(token)
            .query(&[("uploadType", "multipart"), ("fields", "id")])
            .header(
                reqwest::header::CONTENT_TYPE,
                format!("multipart/related; boundary={boundary}"),
            )
            .body(body)
            .send()
            .await?;
        let response = check(response).await?;
        let created: CreatedFile = response.json().await?;
        Ok(created.id)
    }

    /// The view link Drive reports for a file. Used on delete, where the link
    /// must be read before the metadata disappears.
    pub async fn web_view_link(&self, file_id: &str) -> Result<String, DriveError> {
        let token = self.auth.token().await?;
        let response = self
            .http
            .get(format!("{}/files/{file_id}", self.api_base))
            .bearer_auth(token)
            .query(&[("fields", "webViewLink")])
            .send()
            .await?;
        let response = check(response).await?;
        let metadata: FileMetadata = response.json().await?;
        metadata
            .web_view_link
            .ok_or(DriveError::MissingField("webViewLink"))
    }

    pub async fn delete_file(&self, file_id: &str) -> Result<(), DriveError> {
        let token = self.auth.token().await?;
        let response = self
            .http
            .delete(format!("{}/files/{file_id}", self.api_base))
            .bearer_auth(token)
            .send()
            .await?;
        check(response).await?;
        info!(id = %file_id, "deleted drive file");
        Ok(())
    }
}

async fn check(response: reqwest::Response) -> Result<reqwest::Response, DriveError> {
    if response.status().is_success() {
        Ok(response)
    } else {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        Err(DriveError::Api { status, body })
    }
}
