//! Command-line front-end for the upload service.
//!
//! ```text
//! tabctl upload --tab "Tab One" photo.png scan.pdf
//! tabctl delete 1AbCdEf...
//! ```

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};

use tabdrive::client::ApiClient;
use tabdrive::models::Category;

#[derive(Parser)]
#[command(name = "tabctl", about = "Upload files to category tabs and manage them")]
struct Cli {
    /// Base URL of the upload service.
    #[arg(long, default_value = "http://localhost:3001")]
    server: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Upload files into a category tab.
    Upload {
        /// Tab label, e.g. "Tab One".
        #[arg(long)]
        tab: String,

        /// Files to upload, in order.
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Delete an uploaded file by its Drive id.
    Delete { file_id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tabctl=info".into()),
        )
        .init();

    let cli = Cli::parse();
    let client = ApiClient::new(cli.server);

    match cli.command {
        Command::Upload { tab, files } => {
            let Some(category) = Category::from_label(&tab) else {
                let labels: Vec<_> = Category::ALL.iter().map(|c| c.label()).collect();
                bail!("unknown tab label '{tab}'; expected one of: {}", labels.join(", "));
            };

            let response = client.upload(category, &files).await?;
            for (path, file) in files.iter().zip(&response.files) {
                println!("{}\t{}\t{}", path.display(), file.id, file.web_view_link);
            }
        }
        Command::Delete { file_id } => {
            let response = client.delete(&file_id).await?;
            println!("{}", response.message);
        }
    }

    Ok(())
}
