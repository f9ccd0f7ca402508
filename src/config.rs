use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub google: GoogleConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    /// The single origin allowed to call this service with credentials.
    pub cors_allowed_origin: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoogleConfig {
    /// Path to the service-account JSON key used for Drive calls.
    pub drive_key_file: Option<String>,
    /// Path to the service-account JSON key used for Sheets calls.
    /// Falls back to the Drive key when unset.
    pub sheets_key_file: Option<String>,
    /// Static access token override; skips the service-account flow entirely.
    pub access_token: Option<String>,
    pub drive_api_base: String,
    pub drive_upload_base: String,
    pub sheets_api_base: String,
    pub parent_folder_id: String,
    pub spreadsheet_id: String,
    pub sheet_range: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory where incoming multipart files are staged before the Drive write.
    pub staging_dir: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            server: ServerConfig {
                port: env::var("PORT")
                    .unwrap_or_else(|_| "3001".to_string())
                    .parse()?,
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                cors_allowed_origin: env::var("ALLOWED_ORIGIN")
                    .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            },
            google: GoogleConfig {
                drive_key_file: env::var("GOOGLE_DRIVE_KEY_FILE").ok(),
                sheets_key_file: env::var("GOOGLE_SHEETS_KEY_FILE").ok(),
                access_token: env::var("GOOGLE_ACCESS_TOKEN").ok(),
                drive_api_base: env::var("DRIVE_API_BASE")
                    .unwrap_or_else(|_| "https://www.googleapis.com/drive/v3".to_string()),
                drive_upload_base: env::var("DRIVE_UPLOAD_BASE")
                    .unwrap_or_else(|_| "https://www.googleapis.com/upload/drive/v3".to_string()),
                sheets_api_base: env::var("SHEETS_API_BASE")
                    .unwrap_or_else(|_| "https://sheets.googleapis.com/v4".to_string()),
                parent_folder_id: env::var("DRIVE_PARENT_FOLDER_ID")
                    .context("DRIVE_PARENT_FOLDER_ID must be set")?,
                spreadsheet_id: env::var("SHEET_ID").context("SHEET_ID must be set")?,
                sheet_range: env::var("SHEET_RANGE")
                    .unwrap_or_else(|_| "Sheet1!A:A".to_string()),
            },
            storage: StorageConfig {
                staging_dir: env::var("UPLOAD_STAGING_DIR")
                    .unwrap_or_else(|_| "uploads".to_string()),
            },
        })
    }
}
