//! Record stores for books and customers.
//!
//! # Database: `bookstore` schema
//!
//! ## Tables
//!
//! - `book` - Catalogue, keyed by ISBN (primary key)
//! - `customer` - Customers, `SERIAL` id plus a unique index on `user_id`
//!
//! The unique constraints are what actually keep natural keys unique. The
//! services check for an existing record first only to report a clean
//! conflict; a create that loses the race still hits the constraint, which
//! comes back as [`RepositoryError::Conflict`].
//!
//! # Migrations
//!
//! Migrations are stored in `crates/api/migrations/`, embedded in the binary,
//! and run via:
//! ```bash
//! cargo run -p bookstore-cli -- migrate
//! ```
//! or at startup with `BOOKSTORE_RUN_MIGRATIONS=true`.

pub mod books;
pub mod customers;
pub mod memory;

use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::migrate::{MigrateError, Migrator};
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use bookstore_core::{CustomerId, Isbn, UserId};

use crate::models::{Book, BookChanges, Customer, NewCustomer};

pub use books::PgBookStore;
pub use customers::PgCustomerStore;
pub use memory::{MemoryBookStore, MemoryCustomerStore};

/// Embedded schema migrations.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Requested record was not found.
    #[error("not found")]
    NotFound,

    /// Unique constraint violation (e.g., duplicate ISBN).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

impl RepositoryError {
    /// Classify an insert failure, turning unique violations into `Conflict`.
    pub(crate) fn from_insert(e: sqlx::Error, what: &str) -> Self {
        if let sqlx::Error::Database(ref db_err) = e
            && db_err.is_unique_violation()
        {
            return Self::Conflict(format!("{what} already exists"));
        }
        Self::Database(e)
    }
}

/// Storage for books.
#[async_trait]
pub trait BookStore: Send + Sync + 'static {
    /// Get a book by ISBN.
    async fn find_by_isbn(&self, isbn: &Isbn) -> Result<Option<Book>, RepositoryError>;

    /// Insert a new book and return it as stored.
    ///
    /// Returns `RepositoryError::Conflict` if the ISBN is taken.
    async fn insert(&self, book: &Book) -> Result<Book, RepositoryError>;

    /// Apply the present fields of `changes` to the book with this ISBN.
    ///
    /// Returns `RepositoryError::NotFound` if there is no such book.
    async fn update(&self, isbn: &Isbn, changes: &BookChanges) -> Result<(), RepositoryError>;

    /// Check that the store is reachable.
    async fn ping(&self) -> Result<(), RepositoryError>;
}

/// Storage for customers.
#[async_trait]
pub trait CustomerStore: Send + Sync + 'static {
    /// Get a customer by surrogate id.
    async fn find_by_id(&self, id: CustomerId) -> Result<Option<Customer>, RepositoryError>;

    /// Get a customer by user id.
    async fn find_by_user_id(&self, user_id: &UserId)
    -> Result<Option<Customer>, RepositoryError>;

    /// Insert a new customer and return it with its assigned id.
    ///
    /// Returns `RepositoryError::Conflict` if the user id is taken.
    async fn insert(&self, customer: &NewCustomer) -> Result<Customer, RepositoryError>;

    /// Check that the store is reachable.
    async fn ping(&self) -> Result<(), RepositoryError>;
}

/// Create a `PostgreSQL` connection pool.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
/// * `max_connections` - Upper bound on pooled connections
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(
    database_url: &secrecy::SecretString,
    max_connections: u32,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Run the embedded migrations.
///
/// # Errors
///
/// Returns `MigrateError` if a migration fails or the applied history does not
/// match the embedded files.
pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await
}
