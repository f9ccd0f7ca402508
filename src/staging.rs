//! Local staging of incoming multipart files.
//!
//! Each incoming file part is written to the staging directory before the
//! Drive write, under `<field>-<millis>-<suffix>.<ext>`, and removed as soon
//! as the remote copy is confirmed. A crash between staging and confirmation
//! orphans the staged file; there is no cleanup sweep.

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::debug;

/// One file staged on local disk, with its client-declared identity.
#[derive(Debug, Clone)]
pub struct StagedFile {
    pub path: PathBuf,
    pub original_name: String,
    pub content_type: String,
}

impl StagedFile {
    /// Write `data` into the staging directory, creating it if needed.
    pub async fn stage(
        dir: &Path,
        field_name: &str,
        original_name: &str,
        content_type: &str,
        data: &[u8],
    ) -> std::io::Result<Self> {
        fs::create_dir_all(dir).await?;

        let suffix = uuid::Uuid::new_v4().simple().to_string();
        let stem = format!(
            "{field_name}-{}-{}",
            chrono::Utc::now().timestamp_millis(),
            &suffix[..8],
        );
        let filename = match original_name.rsplit_once('.') {
            Some((_, extension)) if !extension.is_empty() => format!("{stem}.{extension}"),
            _ => stem,
        };

        let path = dir.join(filename);
        fs::write(&path, data).await?;
        debug!(path = %path.display(), bytes = data.len(), "staged incoming file");

        Ok(Self {
            path,
            original_name: original_name.to_string(),
            content_type: content_type.to_string(),
        })
    }

    /// Release the local copy. Called only after the remote write is durable.
    pub async fn remove(&self) -> std::io::Result<()> {
        fs::remove_file(&self.path).await
    }
}
