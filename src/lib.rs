// Tabdrive - category-tab file uploads to Google Drive with a Sheets link ledger

pub mod client;
pub mod config;
pub mod error;
pub mod folders;
pub mod google;
pub mod ledger;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod staging;
pub mod uploads;

#[cfg(test)]
pub(crate) mod test_support;

// Re-exports for convenience
pub use config::Config;
pub use models::AppState;
pub use routes::create_router;
