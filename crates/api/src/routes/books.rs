//! Book route handlers.

use axum::{
    Json, Router,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};

use bookstore_core::Isbn;
use tracing::instrument;

use super::{AppJson, AppPath};
use crate::error::Result;
use crate::models::{Book, CreateBookRequest, UpdateBookRequest};
use crate::state::AppState;
use crate::validation::ValidationErrors;

/// Create the book routes router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/books", post(create))
        .route("/books/isbn/{isbn}", get(show))
        .route("/books/{isbn}", get(show).put(update))
}

/// `POST /books`
#[instrument(skip(state, request))]
async fn create(
    State(state): State<AppState>,
    AppJson(request): AppJson<CreateBookRequest>,
) -> Result<impl IntoResponse> {
    let book = state.book_service().create(request).await?;
    let location = book_location(&book.isbn);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(book)))
}

/// `GET /books/{isbn}` and `GET /books/isbn/{isbn}`
#[instrument(skip(state))]
async fn show(
    State(state): State<AppState>,
    AppPath(isbn): AppPath<String>,
) -> Result<Json<Book>> {
    let isbn = path_isbn(&isbn)?;
    Ok(Json(state.book_service().find_by_isbn(&isbn).await?))
}

/// `PUT /books/{isbn}`
#[instrument(skip(state, request))]
async fn update(
    State(state): State<AppState>,
    AppPath(isbn): AppPath<String>,
    AppJson(request): AppJson<UpdateBookRequest>,
) -> Result<Json<Book>> {
    let isbn = path_isbn(&isbn)?;
    Ok(Json(state.book_service().update(&isbn, request).await?))
}

fn path_isbn(raw: &str) -> std::result::Result<Isbn, ValidationErrors> {
    Isbn::parse(raw).map_err(|e| ValidationErrors::single(e.to_string()))
}

fn book_location(isbn: &Isbn) -> String {
    format!("/books/{}", urlencoding::encode(isbn.as_str()))
}
