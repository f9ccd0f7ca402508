//! Google Sheets v4 values client: append, read, and update against one
//! spreadsheet. The ledger semantics live a layer up in [`crate::ledger`].

use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::google::auth::{AuthError, TokenProvider};

/// OAuth scope for spreadsheet access.
pub const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";

#[derive(Debug, Error)]
pub enum SheetsError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("sheets request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("sheets returned {status}: {body}")]
    Api { status: u16, body: String },
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

pub struct SheetsClient {
    http: reqwest::Client,
    api_base: String,
    spreadsheet_id: String,
    auth: Arc<TokenProvider>,
}

impl SheetsClient {
    pub fn new(api_base: String, spreadsheet_id: String, auth: Arc<TokenProvider>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base,
            spreadsheet_id,
            auth,
        }
    }

    /// Append a single-cell row at the end of the range.
    pub async fn append_row(&self, range: &str, value: &str) -> Result<(), SheetsError> {
        let token = self.auth.token().await?;
        let response = self
            .http
            .post(format!(
                "{}/spreadsheets/{}/values/{range}:append",
                self.api_base, self.spreadsheet_id
            ))
            .bearer_auth(token)
            .query(&[("valueInputOption", "USER_ENTERED")])
            .json(&serde_json::json!({ "values": [[value]] }))
            .send()
            .await?;
        check(response).await?;
        debug!(%range, "appended ledger row");
        Ok(())
    }

    /// All rows currently in the range. Empty ranges come back without a
    /// `values` key; that decodes as no rows.
    pub async fn read_range(&self, range: &str) -> Result<Vec<Vec<String>>, SheetsError> {
        let token = self.auth.token().await?;
        let response = self
            .http
            .get(format!(
                "{}/spreadsheets/{}/values/{range}",
                self.api_base, self.spreadsheet_id
            ))
            .bearer_auth(token)
            .send()
            .await?;
        let response = check(response).await?;
        let parsed: ValueRange = response.json().await?;
        Ok(parsed.values)
    }

    /// Overwrite a single cell (or small range) in place.
    pub async fn update_cell(&self, range: &str, value: &str) -> Result<(), SheetsError> {
        let token = self.auth.token().await?;
        let response = self
            .http
            .put(format!(
                "{}/spreadsheets/{}/values/{range}",
                self.api_base, self.spreadsheet_id
            ))
            .bearer_auth(token)
            .query(&[("valueInputOption", "USER_ENTERED")])
            .json(&serde_json::json!({ "values": [[value]] }))
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }
}

async fn check(response: reqwest::Response) -> Result<reqwest::Response, SheetsError> {
    if response.status().is_success() {
        Ok(response)
    } else {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        Err(SheetsError::Api { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn client(server: &mockito::Server) -> SheetsClient {
        let auth = Arc::new(TokenProvider::static_token("test-token"));
        SheetsClient::new(server.url(), "sheet-1".to_string(), auth)
    }

    #[tokio::test]
    async fn append_posts_single_cell_row() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/spreadsheets/sheet-1/values/Sheet1!A:A:append")
            .match_query(Matcher::UrlEncoded(
                "valueInputOption".into(),
                "USER_ENTERED".into(),
            ))
            .match_body(Matcher::Json(serde_json::json!({
                "values": [["https://drive.google.com/file/d/a/view?usp=drive_link"]]
            })))
            .with_body("{}")
            .create_async()
            .await;

        client(&server)
            .append_row(
                "Sheet1!A:A",
                "https://drive.google.com/file/d/a/view?usp=drive_link",
            )
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn read_range_tolerates_missing_values_key() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/spreadsheets/sheet-1/values/Sheet1!A:A")
            .with_body(r#"{"range": "Sheet1!A1:A1000"}"#)
            .create_async()
            .await;

        let rows = client(&server).read_range("Sheet1!A:A").await.unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn update_targets_exact_cell() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PUT", "/spreadsheets/sheet-1/values/Sheet1!A3")
            .match_query(Matcher::UrlEncoded(
                "valueInputOption".into(),
                "USER_ENTERED".into(),
            ))
            .match_body(Matcher::Json(serde_json::json!({ "values": [[""]] })))
            .with_body("{}")
            .create_async()
            .await;

        client(&server).update_cell("Sheet1!A3", "").await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn api_error_carries_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/spreadsheets/sheet-1/values/Sheet1!A:A")
            .with_status(403)
            .with_body("permission denied")
            .create_async()
            .await;

        let err = client(&server).read_range("Sheet1!A:A").await.unwrap_err();
        match err {
            SheetsError::Api { status, body } => {
                assert_eq!(status, 403);
                assert!(body.contains("permission denied"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
