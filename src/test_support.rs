//! Shared fixtures for in-crate tests: an [`AppState`] wired to a mockito
//! server standing in for both the Drive and Sheets backends.

use std::sync::Arc;

use crate::config::{Config, GoogleConfig, ServerConfig, StorageConfig};
use crate::folders::FolderResolver;
use crate::google::auth::TokenProvider;
use crate::google::drive::DriveClient;
use crate::google::sheets::SheetsClient;
use crate::ledger::LinkLedger;
use crate::models::AppState;

pub fn state_for(server: &mockito::Server, staging_dir: &std::path::Path) -> AppState {
    let config = Config {
        server: ServerConfig {
            port: 0,
            host: "127.0.0.1".to_string(),
            cors_allowed_origin: "http://localhost:3000".to_string(),
        },
        google: GoogleConfig {
            drive_key_file: None,
            sheets_key_file: None,
            access_token: Some("test-token".to_string()),
            drive_api_base: server.url(),
            drive_upload_base: format!("{}/upload", server.url()),
            sheets_api_base: server.url(),
            parent_folder_id: "parent1".to_string(),
            spreadsheet_id: "sheet-1".to_string(),
            sheet_range: "Sheet1!A:A".to_string(),
        },
        storage: StorageConfig {
            staging_dir: staging_dir.to_string_lossy().to_string(),
        },
    };

    let auth = Arc::new(TokenProvider::static_token("test-token"));
    let drive = Arc::new(DriveClient::new(
        config.google.drive_api_base.clone(),
        config.google.drive_upload_base.clone(),
        auth.clone(),
    ));
    let sheets = SheetsClient::new(
        config.google.sheets_api_base.clone(),
        config.google.spreadsheet_id.clone(),
        auth,
    );
    let ledger = Arc::new(LinkLedger::new(sheets, config.google.sheet_range.clone()));
    let folders = Arc::new(FolderResolver::new(
        drive.clone(),
        config.google.parent_folder_id.clone(),
    ));

    AppState {
        config,
        drive,
        ledger,
        folders,
    }
}
