//! HTTP client for the upload service, used by `tabctl` and embeddable in
//! other front-ends.

use std::path::Path;

use thiserror::Error;
use tracing::debug;

use crate::models::{Category, DeleteResponse, UploadResponse};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("failed to read {path}: {source}")]
    FileRead {
        path: String,
        source: std::io::Error,
    },

    #[error("server returned {status}: {body}")]
    Server { status: u16, body: String },
}

pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: reqwest::Client::new(),
        }
    }

    /// Upload local files into a category. Builds the same multipart form the
    /// browser UI sends: a `tabLabel` text field plus one `files` part per
    /// file, with the filename and a guessed content type.
    pub async fn upload(
        &self,
        category: Category,
        paths: &[impl AsRef<Path>],
    ) -> Result<UploadResponse, ClientError> {
        let mut form = reqwest::multipart::Form::new().text("tabLabel", category.label());

        for path in paths {
            let path = path.as_ref();
            let data = tokio::fs::read(path).await.map_err(|source| ClientError::FileRead {
                path: path.display().to_string(),
                source,
            })?;
            let filename = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| "upload.bin".to_string());
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            let part = reqwest::multipart::Part::bytes(data)
                .file_name(filename)
                .mime_str(mime.as_ref())?;
            form = form.part("files", part);
        }

        debug!(%category, files = paths.len(), "posting upload");
        let response = self
            .http
            .post(format!("{}/upload", self.base_url))
            .multipart(form)
            .send()
            .await?;
        let response = check(response).await?;
        Ok(response.json().await?)
    }

    pub async fn delete(&self, file_id: &str) -> Result<DeleteResponse, ClientError> {
        let response = self
            .http
            .delete(format!("{}/delete/{file_id}", self.base_url))
            .send()
            .await?;
        let response = check(response).await?;
        Ok(response.json().await?)
    }
}

async fn check(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    if response.status().is_success() {
        Ok(response)
    } else {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        Err(ClientError::Server { status, body })
    }
}
