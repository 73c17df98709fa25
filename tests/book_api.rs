//! Book API Tests
//!
//! Drive the full router in-process against a JSON document in a temp dir:
//! - Status codes and envelopes per route
//! - Allow-listed updates and `Id` immutability
//! - Registration and deletion persistence
//! - Generic 500s on storage failure

use std::fs;
use std::path::Path;
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use bookshelf::books::BookService;
use bookshelf::http_server::build_router;
use bookshelf::model::Book;
use bookshelf::storage::{JsonFileBackend, StorageBackend, StorageError, StorageResult};

// =============================================================================
// Helpers
// =============================================================================

fn seed(path: &Path) {
    let books = json!([
        { "Id": 1, "Title": "1984", "Author": "Orwell", "PrintLength": 328, "Publisher": "Secker" }
    ]);
    fs::write(path, serde_json::to_string_pretty(&books).unwrap()).unwrap();
}

fn router_for(path: &Path) -> Router {
    let service = Arc::new(BookService::new(JsonFileBackend::new(path)));
    build_router(service, &[])
}

fn seeded_router() -> (TempDir, Router) {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("books.json");
    seed(&path);
    let router = router_for(&path);
    (temp, router)
}

async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn on_disk(path: &Path) -> Vec<Value> {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

// =============================================================================
// Read paths
// =============================================================================

#[tokio::test]
async fn test_list_books() {
    let (_temp, router) = seeded_router();

    let (status, body) = send(&router, Method::GET, "/api/v1/books", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "List of books retrieved successfully");
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

/// A trailing slash is the list, not an empty id.
#[tokio::test]
async fn test_trailing_slash_routes_to_list() {
    let (_temp, router) = seeded_router();

    let (status, body) = send(&router, Method::GET, "/api/v1/books/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"].is_array());
}

#[tokio::test]
async fn test_list_missing_document_is_empty() {
    let temp = TempDir::new().unwrap();
    let router = router_for(&temp.path().join("absent.json"));

    let (status, body) = send(&router, Method::GET, "/api/v1/books", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn test_list_malformed_document_is_empty() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("books.json");
    fs::write(&path, "[{ \"Id\": 1,").unwrap();
    let router = router_for(&path);

    let (status, body) = send(&router, Method::GET, "/api/v1/books", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn test_get_book() {
    let (_temp, router) = seeded_router();

    let (status, body) = send(&router, Method::GET, "/api/v1/books/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["Title"], "1984");
    assert_eq!(body["message"], "Book with ID 1 retrieved successfully");
}

#[tokio::test]
async fn test_get_unknown_book() {
    let (_temp, router) = seeded_router();

    let (status, body) = send(&router, Method::GET, "/api/v1/books/99", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "Book with ID 99 not found" }));

    let (status, _) = send(&router, Method::GET, "/api/v1/books/abc", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_blank_id_is_bad_request() {
    let (_temp, router) = seeded_router();

    let (status, body) = send(&router, Method::GET, "/api/v1/books/%20", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "message": "Book ID is required" }));
}

// =============================================================================
// Update
// =============================================================================

#[tokio::test]
async fn test_update_then_get() {
    let (temp, router) = seeded_router();

    let (status, body) = send(
        &router,
        Method::PUT,
        "/api/v1/books/1",
        Some(json!({ "Description": "dystopian novel" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Book with ID 1 updated successfully");
    assert_eq!(body["data"]["Description"], "dystopian novel");
    assert_eq!(body["data"]["Title"], "1984");

    let (status, body) = send(&router, Method::GET, "/api/v1/books/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["Description"], "dystopian novel");
    assert_eq!(body["data"]["PrintLength"], 328);

    let stored = on_disk(&temp.path().join("books.json"));
    assert_eq!(stored[0]["Description"], "dystopian novel");
}

#[tokio::test]
async fn test_update_cannot_change_id() {
    let (temp, router) = seeded_router();
    let path = temp.path().join("books.json");
    let before = fs::read_to_string(&path).unwrap();

    let (status, body) = send(&router, Method::PUT, "/api/v1/books/1", Some(json!({ "Id": 999 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["Id"], 1);
    assert_eq!(body["message"], "No changes applied to book with ID 1");

    // Nothing was rewritten
    assert_eq!(fs::read_to_string(&path).unwrap(), before);
}

#[tokio::test]
async fn test_update_unknown_book() {
    let (_temp, router) = seeded_router();

    let (status, body) = send(&router, Method::PUT, "/api/v1/books/99", Some(json!({ "Title": "X" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Book with ID 99 not found");
}

#[tokio::test]
async fn test_update_rejects_bad_body() {
    let (_temp, router) = seeded_router();

    let request = Request::builder()
        .method(Method::PUT)
        .uri("/api/v1/books/1")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{ not json"))
        .unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(response.into_body(), 1024).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, json!({ "message": "Invalid JSON body" }));

    let (status, body) = send(&router, Method::PUT, "/api/v1/books/1", Some(json!({ "PrintLength": "long" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid value for field PrintLength");
}

// =============================================================================
// Loosely typed documents
// =============================================================================

#[tokio::test]
async fn test_loosely_typed_document_is_served_and_preserved() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("books.json");
    let emma = json!({ "Id": 2, "Title": "Emma", "PrintLength": "474", "Publisher": null, "Tags": ["classic"] });
    fs::write(&path, json!([{ "Id": 1, "Title": "1984" }, emma]).to_string()).unwrap();
    let router = router_for(&path);

    let (status, body) = send(&router, Method::GET, "/api/v1/books", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    let (status, body) = send(&router, Method::GET, "/api/v1/books/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["Title"], "1984");

    let (status, body) = send(&router, Method::GET, "/api/v1/books/2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], emma);

    let (status, _) = send(&router, Method::PUT, "/api/v1/books/1", Some(json!({ "Title": "X" }))).await;
    assert_eq!(status, StatusCode::OK);

    let stored = on_disk(&path);
    assert_eq!(stored[0], json!({ "Id": 1, "Title": "X" }));
    assert_eq!(stored[1], emma);
}

// =============================================================================
// Register / Delete
// =============================================================================

#[tokio::test]
async fn test_register_book() {
    let (temp, router) = seeded_router();

    let (status, body) = send(
        &router,
        Method::POST,
        "/api/v1/books",
        Some(json!({ "Title": "Dune", "Author": "Herbert", "ISBN": "978-0441013593" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Book registered successfully");
    assert_eq!(body["data"]["Id"], 2);
    assert_eq!(body["data"]["ISBN"], "978-0441013593");

    let stored = on_disk(&temp.path().join("books.json"));
    assert_eq!(stored.len(), 2);
    assert_eq!(stored[1]["Title"], "Dune");
}

#[tokio::test]
async fn test_register_validation_and_conflict() {
    let (_temp, router) = seeded_router();

    let (status, body) = send(&router, Method::POST, "/api/v1/books/", Some(json!({ "Author": "Anon" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Failed to register book: Title is required");

    let (status, body) = send(
        &router,
        Method::POST,
        "/api/v1/books",
        Some(json!({ "Id": 1, "Title": "Again", "Author": "Orwell" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Book with ID 1 already exists");
}

#[tokio::test]
async fn test_delete_book() {
    let (temp, router) = seeded_router();

    let (status, body) = send(&router, Method::DELETE, "/api/v1/books/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["Title"], "1984");

    let (status, _) = send(&router, Method::DELETE, "/api/v1/books/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    assert!(on_disk(&temp.path().join("books.json")).is_empty());
}

// =============================================================================
// Failures and plumbing
// =============================================================================

/// Document that reads fine but cannot be written.
#[derive(Debug)]
struct ReadOnlyDocument(JsonFileBackend);

impl StorageBackend for ReadOnlyDocument {
    fn try_load_all(&self) -> StorageResult<Vec<Book>> {
        self.0.try_load_all()
    }

    fn save_all(&self, _books: &[Book]) -> StorageResult<()> {
        Err(StorageError::IoError("failed to write /srv/books.json: No space left on device".into()))
    }
}

#[tokio::test]
async fn test_write_failure_is_generic_500() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("books.json");
    seed(&path);
    let service = Arc::new(BookService::new(ReadOnlyDocument(JsonFileBackend::new(&path))));
    let router = build_router(service, &[]);

    let (status, body) = send(&router, Method::PUT, "/api/v1/books/1", Some(json!({ "Title": "X" }))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "message": "Internal server error" }));

    let (status, _) = send(&router, Method::POST, "/api/v1/books", Some(json!({ "Title": "T", "Author": "A" }))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_mutation_on_malformed_document_is_500() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("books.json");
    fs::write(&path, "not json at all").unwrap();
    let router = router_for(&path);

    let (status, _) = send(&router, Method::POST, "/api/v1/books", Some(json!({ "Title": "T", "Author": "A" }))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    // The unreadable document is left as it was
    assert_eq!(fs::read_to_string(&path).unwrap(), "not json at all");
}

#[tokio::test]
async fn test_health_and_unknown_route() {
    let (_temp, router) = seeded_router();

    let (status, body) = send(&router, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = send(&router, Method::GET, "/api/v2/books", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Route not found");
}

#[tokio::test]
async fn test_request_id_header() {
    let (_temp, router) = seeded_router();

    let request = Request::builder()
        .uri("/api/v1/books")
        .header("x-request-id", "req-42")
        .body(Body::empty())
        .unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.headers()["x-request-id"], "req-42");

    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let response = router.oneshot(request).await.unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}
