/// Router builders and request helpers for driving the HTTP surface in-process.
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use cinema_club_lib::commands::{build_router, AppState};
use cinema_club_lib::shared::{AppConfig, Database};
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

/// Points at a port nothing listens on, with a short pool timeout.
pub const UNREACHABLE_DATABASE_URL: &str = "postgres://nobody@127.0.0.1:1/none";

pub fn test_config(database_url: &str) -> AppConfig {
    let url = database_url.to_string();
    AppConfig::from_sources(
        move |key| match key {
            "DATABASE_URL" => Some(url.clone()),
            "DB_CONNECTION_TIMEOUT_SECS" => Some("1".to_string()),
            _ => None,
        },
        None,
    )
    .expect("test configuration must be valid")
}

/// Router whose database can never be reached.
pub fn offline_app() -> Router {
    let config = Arc::new(test_config(UNREACHABLE_DATABASE_URL));
    let database = Arc::new(Database::new(&config.database));
    build_router(AppState::new(database, config))
}

/// Router over an already migrated database.
pub fn app_with(database: Arc<Database>) -> Router {
    let config = Arc::new(test_config(UNREACHABLE_DATABASE_URL));
    build_router(AppState::new(database, config))
}

pub fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn empty_request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub const BOUNDARY: &str = "cinema-club-test-boundary";

/// Multipart body with a single file field.
pub fn multipart_request(field: &str, content_type: &str, bytes: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"upload.bin\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method(Method::POST)
        .uri("/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

/// Sends one request and decodes the JSON response body (`Null` if empty).
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    (status, body)
}
