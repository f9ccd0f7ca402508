//! HTTP surface:
//! - `POST /upload` — multipart upload into a category folder
//! - `DELETE /delete/{file_id}` — remove a file and its ledger row
//! - `GET /api/health` — liveness probe

pub mod delete;
pub mod health;
pub mod upload;

use anyhow::Result;
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::middleware::cors::cors_layer;
use crate::models::AppState;

pub fn create_router(state: AppState) -> Result<Router> {
    info!("creating application router");
    let cors = cors_layer(&state.config.server.cors_allowed_origin)?;

    Ok(Router::new()
        .merge(upload::router(state.clone()))
        .merge(delete::router(state))
        .merge(health::router())
        .layer(cors)
        .layer(TraceLayer::new_for_http()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::google::drive::DriveClient;
    use crate::test_support::state_for;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use mockito::Matcher;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use tempfile::TempDir;
    use tower::util::ServiceExt;

    const BOUNDARY: &str = "xYzZY-tabdrive-test";

    fn multipart_body(label: Option<&str>, files: &[(&str, &str, &[u8])]) -> Body {
        let mut body: Vec<u8> = Vec::new();
        if let Some(label) = label {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"tabLabel\"\r\n\r\n{label}\r\n"
                )
                .as_bytes(),
            );
        }
        for (filename, content_type, data) in files {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"files\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(data);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        Body::from(body)
    }

    fn upload_request(label: Option<&str>, files: &[(&str, &str, &[u8])]) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(multipart_body(label, files))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn app(server: &mockito::Server, dir: &TempDir) -> Router {
        create_router(state_for(server, dir.path())).unwrap()
    }

    #[tokio::test]
    async fn first_upload_creates_folder_and_delete_unwinds_one_file() {
        let mut server = mockito::Server::new_async().await;
        let dir = TempDir::new().unwrap();

        // Folder lookup is empty until the create call lands.
        let folder_created = Arc::new(AtomicBool::new(false));
        let lookup_flag = folder_created.clone();
        server
            .mock("GET", "/files")
            .match_query(Matcher::Any)
            .with_body_from_request(move |_| {
                if lookup_flag.load(Ordering::SeqCst) {
                    br#"{"files": [{"id": "folder-tab-one"}]}"#.to_vec()
                } else {
                    br#"{"files": []}"#.to_vec()
                }
            })
            .create_async()
            .await;
        let create_flag = folder_created.clone();
        let folder_create = server
            .mock("POST", "/files")
            .match_query(Matcher::Any)
            .with_body_from_request(move |_| {
                create_flag.store(true, Ordering::SeqCst);
                br#"{"id": "folder-tab-one"}"#.to_vec()
            })
            .expect(1)
            .create_async()
            .await;

        for (filename, id) in [("one.png", "id-a"), ("two.png", "id-b")] {
            server
                .mock("POST", "/upload/files")
                .match_query(Matcher::Any)
                .match_body(Matcher::Regex(format!(r#""name":"{filename}""#)))
                .with_body(format!(r#"{{"id": "{id}"}}"#))
                .create_async()
                .await;
        }
        let appends = server
            .mock("POST", "/spreadsheets/sheet-1/values/Sheet1!A:A:append")
            .match_query(Matcher::Any)
            .with_body("{}")
            .expect(2)
            .create_async()
            .await;

        let response = app(&server, &dir)
            .oneshot(upload_request(
                Some("Tab One"),
                &[
                    ("one.png", "image/png", b"first"),
                    ("two.png", "image/png", b"second"),
                ],
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        let files = body["files"].as_array().unwrap();
        assert_eq!(files.len(), 2);
        assert_eq!(files[0]["id"], "id-a");
        assert_eq!(files[1]["id"], "id-b");
        assert_eq!(
            files[0]["webViewLink"],
            DriveClient::view_link("id-a").as_str()
        );
        folder_create.assert_async().await;
        appends.assert_async().await;

        // Now delete file A: Drive loses it and its ledger row is blanked.
        let link_a = DriveClient::view_link("id-a");
        server
            .mock("GET", "/files/id-a")
            .match_query(Matcher::Any)
            .with_body(format!(r#"{{"webViewLink": "{link_a}"}}"#))
            .create_async()
            .await;
        let drive_delete = server
            .mock("DELETE", "/files/id-a")
            .with_status(204)
            .create_async()
            .await;
        server
            .mock("GET", "/spreadsheets/sheet-1/values/Sheet1!A:A")
            .with_body(
                serde_json::json!({
                    "values": [[link_a], [DriveClient::view_link("id-b")]]
                })
                .to_string(),
            )
            .create_async()
            .await;
        let blank = server
            .mock("PUT", "/spreadsheets/sheet-1/values/Sheet1!A1")
            .match_query(Matcher::Any)
            .match_body(Matcher::Json(serde_json::json!({ "values": [[""]] })))
            .with_body("{}")
            .create_async()
            .await;

        let response = app(&server, &dir)
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/delete/id-a")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["message"], "File deleted successfully");
        drive_delete.assert_async().await;
        blank.assert_async().await;
    }

    #[tokio::test]
    async fn unknown_tab_label_is_rejected_before_any_backend_call() {
        let mut server = mockito::Server::new_async().await;
        let dir = TempDir::new().unwrap();
        let lookup = server
            .mock("GET", "/files")
            .match_query(Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let response = app(&server, &dir)
            .oneshot(upload_request(
                Some("Tab Six"),
                &[("one.png", "image/png", b"x")],
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"], "Bad Request");
        lookup.assert_async().await;
    }

    #[tokio::test]
    async fn upload_without_files_is_rejected() {
        let server = mockito::Server::new_async().await;
        let dir = TempDir::new().unwrap();

        let response = app(&server, &dir)
            .oneshot(upload_request(Some("Tab One"), &[]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn backend_failure_surfaces_as_internal_error_body() {
        let mut server = mockito::Server::new_async().await;
        let dir = TempDir::new().unwrap();
        server
            .mock("GET", "/files")
            .match_query(Matcher::Any)
            .with_status(500)
            .with_body("drive is down")
            .create_async()
            .await;

        let response = app(&server, &dir)
            .oneshot(upload_request(
                Some("Tab One"),
                &[("one.png", "image/png", b"x")],
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(response).await;
        assert_eq!(body["error"], "Internal Server Error");
        assert!(body["message"].as_str().unwrap().contains("drive is down"));
    }

    #[tokio::test]
    async fn delete_failure_uses_delete_error_body() {
        let mut server = mockito::Server::new_async().await;
        let dir = TempDir::new().unwrap();
        server
            .mock("GET", "/files/id-x")
            .match_query(Matcher::Any)
            .with_status(404)
            .with_body("File not found")
            .create_async()
            .await;

        let response = app(&server, &dir)
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/delete/id-x")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(response).await;
        assert_eq!(body["message"], "Error deleting file");
        assert!(body["error"].as_str().unwrap().contains("File not found"));
    }

    #[tokio::test]
    async fn cors_allows_the_configured_origin_with_credentials() {
        let server = mockito::Server::new_async().await;
        let dir = TempDir::new().unwrap();

        let response = app(&server, &dir)
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/api/health")
                    .header(header::ORIGIN, "http://localhost:3000")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .unwrap(),
            "http://localhost:3000"
        );
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS)
                .unwrap(),
            "true"
        );
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let server = mockito::Server::new_async().await;
        let dir = TempDir::new().unwrap();

        let response = app(&server, &dir)
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/api/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "ok");
    }
}
