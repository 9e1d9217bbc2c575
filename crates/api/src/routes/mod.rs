//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (pings both stores)
//!
//! # Books
//! POST /books                  - Create a book (201 + Location)
//! GET  /books/isbn/{isbn}      - Get a book by ISBN
//! GET  /books/{isbn}           - Get a book by ISBN
//! PUT  /books/{isbn}           - Partially update a book
//!
//! # Customers
//! POST /customers              - Create a customer (201 + Location)
//! GET  /customers/{id}         - Get a customer by id
//! GET  /customers?userId=...   - Get a customer by user id
//! ```

pub mod books;
pub mod customers;
mod extract;

use std::time::Duration;

use axum::{Router, extract::State, http::StatusCode, routing::get};
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::middleware::request_id_middleware;
use crate::state::AppState;

pub use extract::{AppJson, AppPath, AppQuery};

/// Build the application router with its tracing and request ID layers.
///
/// Sentry layers are added by the binary, outside of this router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(books::routes())
        .merge(customers::routes())
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>, latency: Duration, span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable if either store is unreachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    let (books, customers) = tokio::join!(state.books().ping(), state.customers().ping());
    match books.and(customers) {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
