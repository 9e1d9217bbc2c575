//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::db::{
    BookStore, CustomerStore, MemoryBookStore, MemoryCustomerStore, PgBookStore, PgCustomerStore,
};
use crate::services::{BookService, CustomerService};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. Handlers never see which
/// backend is behind the stores.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    books: Box<dyn BookStore>,
    customers: Box<dyn CustomerStore>,
}

impl AppState {
    /// Create a new application state from a pair of stores.
    #[must_use]
    pub fn new(books: impl BookStore, customers: impl CustomerStore) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                books: Box::new(books),
                customers: Box::new(customers),
            }),
        }
    }

    /// State backed by `PostgreSQL`.
    #[must_use]
    pub fn postgres(pool: PgPool) -> Self {
        Self::new(PgBookStore::new(pool.clone()), PgCustomerStore::new(pool))
    }

    /// State backed by empty in-process stores.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(MemoryBookStore::new(), MemoryCustomerStore::new())
    }

    /// Get a reference to the book store.
    #[must_use]
    pub fn books(&self) -> &dyn BookStore {
        self.inner.books.as_ref()
    }

    /// Get a reference to the customer store.
    #[must_use]
    pub fn customers(&self) -> &dyn CustomerStore {
        self.inner.customers.as_ref()
    }

    /// Book workflows over this state's store.
    #[must_use]
    pub fn book_service(&self) -> BookService<'_> {
        BookService::new(self.books())
    }

    /// Customer workflows over this state's store.
    #[must_use]
    pub fn customer_service(&self) -> CustomerService<'_> {
        CustomerService::new(self.customers())
    }
}
