use axum::http::{header, StatusCode};
use local_library::models::BookInstanceStatus;
use serde_json::Value;

use crate::common::TestApp;

#[tokio::test]
async fn test_root_redirects_to_catalog() {
    let app = TestApp::new();

    let response = app.get("/").await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), "/catalog");
}

#[tokio::test]
async fn test_index_shows_counts() {
    let app = TestApp::new();
    let author = app.seed_author("Frank", "Herbert").await;
    let book = app.seed_book("Dune", &author, &[]).await;
    app.seed_copy(&book, BookInstanceStatus::Available).await;
    app.seed_copy(&book, BookInstanceStatus::Loaned).await;

    let response = app.get("/catalog").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("<strong>Books:</strong> 1"));
    assert!(response.body.contains("<strong>Copies:</strong> 2"));
    assert!(response.body.contains("<strong>Copies available:</strong> 1"));
    assert!(response.body.contains("<strong>Genres:</strong> 0"));
}

#[tokio::test]
async fn test_unknown_route_renders_error_page() {
    let app = TestApp::new();

    let response = app.get("/catalog/nowhere").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert!(response.body.contains("<h1>Not Found</h1>"));
}

#[tokio::test]
async fn test_content_security_policy_header() {
    let app = TestApp::new();

    let response = app.get("/catalog").await;
    let csp = response
        .headers
        .get(header::CONTENT_SECURITY_POLICY)
        .and_then(|v| v.to_str().ok());
    assert_eq!(
        csp,
        Some("script-src 'self' code.jquery.com cdn.jsdelivr.net")
    );
}

#[tokio::test]
async fn test_health_endpoints() {
    let app = TestApp::new();

    let health = app.get("/health").await;
    assert_eq!(health.status, StatusCode::OK);
    let body: Value = serde_json::from_str(&health.body).unwrap();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));

    let ready = app.get("/ready").await;
    assert_eq!(ready.status, StatusCode::OK);
    let body: Value = serde_json::from_str(&ready.body).unwrap();
    assert_eq!(body["status"], "ready");
}
