//! Book HTTP Routes
//!
//! | Method | Path                 | Success              |
//! |--------|----------------------|----------------------|
//! | GET    | `/api/v1/books`      | 200 + list           |
//! | POST   | `/api/v1/books`      | 201 + created record |
//! | GET    | `/api/v1/books/:id`  | 200 + record         |
//! | PUT    | `/api/v1/books/:id`  | 200 + record         |
//! | DELETE | `/api/v1/books/:id`  | 200 + removed record |
//!
//! The collection routes are also registered with a trailing slash so
//! `/api/v1/books/` is the list, never an empty id.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::Value;

use crate::books::{BookError, BookService, UpdateOutcome};
use crate::model::Book;
use crate::storage::StorageBackend;

use super::response::DataResponse;

pub const BOOKS_PATH: &str = "/api/v1/books";

type BooksState<B> = Arc<BookService<B>>;
type ApiResult<T> = Result<T, BookError>;

/// Create book routes
pub fn book_routes<B: StorageBackend + 'static>(service: Arc<BookService<B>>) -> Router {
    let collection = get(list_books_handler::<B>).post(register_book_handler::<B>);
    let item = get(get_book_handler::<B>)
        .put(update_book_handler::<B>)
        .delete(delete_book_handler::<B>);

    Router::new()
        .route(BOOKS_PATH, collection.clone())
        .route(&format!("{}/", BOOKS_PATH), collection)
        .route(&format!("{}/:id", BOOKS_PATH), item)
        .with_state(service)
}

async fn list_books_handler<B: StorageBackend + 'static>(
    State(service): State<BooksState<B>>,
) -> Json<DataResponse<Vec<Book>>> {
    let books = service.list_all();
    Json(DataResponse::new(
        "List of books retrieved successfully",
        books,
    ))
}

async fn get_book_handler<B: StorageBackend + 'static>(
    State(service): State<BooksState<B>>,
    Path(id): Path<String>,
) -> ApiResult<Json<DataResponse<Book>>> {
    let book = service
        .get_by_id(&id)?
        .ok_or_else(|| BookError::NotFound(id.clone()))?;

    Ok(Json(DataResponse::new(
        format!("Book with ID {} retrieved successfully", id),
        book,
    )))
}

async fn update_book_handler<B: StorageBackend + 'static>(
    State(service): State<BooksState<B>>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<DataResponse<Book>>> {
    let Json(body) = body?;

    match service.update(&id, &body)? {
        UpdateOutcome::NotFound => Err(BookError::NotFound(id)),
        UpdateOutcome::NoOp(book) => Ok(Json(DataResponse::new(
            format!("No changes applied to book with ID {}", id),
            book,
        ))),
        UpdateOutcome::Updated(book) => Ok(Json(DataResponse::new(
            format!("Book with ID {} updated successfully", id),
            book,
        ))),
    }
}

async fn register_book_handler<B: StorageBackend + 'static>(
    State(service): State<BooksState<B>>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<DataResponse<Book>>)> {
    let Json(body) = body?;
    let book = service.register(&body)?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::new("Book registered successfully", book)),
    ))
}

async fn delete_book_handler<B: StorageBackend + 'static>(
    State(service): State<BooksState<B>>,
    Path(id): Path<String>,
) -> ApiResult<Json<DataResponse<Book>>> {
    let book = service
        .delete_by_id(&id)?
        .ok_or_else(|| BookError::NotFound(id.clone()))?;

    Ok(Json(DataResponse::new(
        format!("Book with ID {} deleted successfully", id),
        book,
    )))
}
