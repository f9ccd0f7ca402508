use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tabdrive::config::{Config, GoogleConfig};
use tabdrive::folders::FolderResolver;
use tabdrive::google::auth::{ServiceAccountKey, TokenProvider};
use tabdrive::google::drive::{DriveClient, DRIVE_SCOPE};
use tabdrive::google::sheets::{SheetsClient, SHEETS_SCOPE};
use tabdrive::ledger::LinkLedger;
use tabdrive::models::AppState;
use tabdrive::routes::create_router;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tabdrive=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;
    info!("Configuration loaded: {:?}", config.server);

    let state = build_state(config.clone()).await?;
    let app = create_router(state)?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Server listening on {}", addr);

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    Ok(())
}

async fn build_state(config: Config) -> Result<AppState> {
    let drive_auth = Arc::new(
        token_provider(
            &config.google,
            config.google.drive_key_file.as_deref(),
            DRIVE_SCOPE,
        )
        .await?,
    );
    // The sheet may live under a different service account; fall back to the
    // Drive key when only one is provisioned.
    let sheets_key = config
        .google
        .sheets_key_file
        .as_deref()
        .or(config.google.drive_key_file.as_deref());
    let sheets_auth = Arc::new(token_provider(&config.google, sheets_key, SHEETS_SCOPE).await?);

    let drive = Arc::new(DriveClient::new(
        config.google.drive_api_base.clone(),
        config.google.drive_upload_base.clone(),
        drive_auth,
    ));
    let sheets = SheetsClient::new(
        config.google.sheets_api_base.clone(),
        config.google.spreadsheet_id.clone(),
        sheets_auth,
    );
    let ledger = Arc::new(LinkLedger::new(sheets, config.google.sheet_range.clone()));
    let folders = Arc::new(FolderResolver::new(
        drive.clone(),
        config.google.parent_folder_id.clone(),
    ));

    Ok(AppState {
        config,
        drive,
        ledger,
        folders,
    })
}

async fn token_provider(
    google: &GoogleConfig,
    key_file: Option<&str>,
    scope: &str,
) -> Result<TokenProvider> {
    if let Some(token) = &google.access_token {
        return Ok(TokenProvider::static_token(token.clone()));
    }
    let path = key_file
        .context("GOOGLE_DRIVE_KEY_FILE must be set when GOOGLE_ACCESS_TOKEN is not provided")?;
    let key = ServiceAccountKey::from_file(path).await?;
    Ok(TokenProvider::service_account(key, scope))
}
