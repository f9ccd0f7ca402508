//! Client-side pieces: the HTTP API client and the per-tab UI state model.

pub mod api;
pub mod state;

pub use api::{ApiClient, ClientError};
pub use state::{TabBoard, TabState};
