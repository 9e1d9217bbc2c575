//! Integration tests for the bookstore API.
//!
//! # Running Tests
//!
//! ```bash
//! # In-memory suites (no external services)
//! cargo test -p bookstore-integration-tests
//!
//! # PostgreSQL suite
//! BOOKSTORE_TEST_DATABASE_URL=postgres://localhost/bookstore_test \
//!     cargo test -p bookstore-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `books` - Book intake over HTTP
//! - `customers` - Customer intake over HTTP
//! - `postgres` - The same workflows against a real database (ignored by default)

use std::net::SocketAddr;

use reqwest::Client;
use secrecy::SecretString;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use bookstore_api::db;
use bookstore_api::routes;
use bookstore_api::state::AppState;

/// Environment variable naming the database for the PostgreSQL suite.
pub const TEST_DATABASE_URL: &str = "BOOKSTORE_TEST_DATABASE_URL";

/// A running API server on an ephemeral local port.
pub struct TestServer {
    pub client: Client,
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Serve the real router over `state`.
    ///
    /// # Panics
    ///
    /// Panics if no local port can be bound.
    pub async fn spawn(state: AppState) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Listener has no address");

        let handle = tokio::spawn(async move {
            axum::serve(listener, routes::app(state))
                .await
                .expect("Test server error");
        });

        Self {
            client: Client::new(),
            addr,
            handle,
        }
    }

    /// Serve over fresh in-memory stores.
    pub async fn in_memory() -> Self {
        Self::spawn(AppState::in_memory()).await
    }

    /// Serve over the database named by `BOOKSTORE_TEST_DATABASE_URL`.
    ///
    /// Migrations are applied first. Returns `None` when the variable is unset.
    ///
    /// # Panics
    ///
    /// Panics if the database is unreachable or migrations fail.
    pub async fn postgres() -> Option<Self> {
        let url = std::env::var(TEST_DATABASE_URL).ok()?;
        let pool = db::create_pool(&SecretString::from(url), 5)
            .await
            .expect("Failed to connect to test database");
        db::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");
        Some(Self::spawn(AppState::postgres(pool)).await)
    }

    /// Absolute URL for `path` on this server.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
