//! In-process stores.
//!
//! Used by the test suites and by `BOOKSTORE_STORAGE=memory` for local
//! development. They enforce the same uniqueness rules as the database schema,
//! so a duplicate insert fails with `RepositoryError::Conflict` here too.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use bookstore_core::{CustomerId, Isbn, UserId};

use super::{BookStore, CustomerStore, RepositoryError};
use crate::models::{Book, BookChanges, Customer, NewCustomer};

/// Books held in a map keyed by ISBN.
#[derive(Default)]
pub struct MemoryBookStore {
    books: RwLock<BTreeMap<Isbn, Book>>,
}

impl MemoryBookStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored books.
    pub async fn len(&self) -> usize {
        self.books.read().await.len()
    }

    /// Whether the store holds no books.
    pub async fn is_empty(&self) -> bool {
        self.books.read().await.is_empty()
    }
}

#[async_trait]
impl BookStore for MemoryBookStore {
    async fn find_by_isbn(&self, isbn: &Isbn) -> Result<Option<Book>, RepositoryError> {
        Ok(self.books.read().await.get(isbn).cloned())
    }

    async fn insert(&self, book: &Book) -> Result<Book, RepositoryError> {
        let mut books = self.books.write().await;
        if books.contains_key(&book.isbn) {
            return Err(RepositoryError::Conflict("ISBN already exists".to_owned()));
        }
        books.insert(book.isbn.clone(), book.clone());
        Ok(book.clone())
    }

    async fn update(&self, isbn: &Isbn, changes: &BookChanges) -> Result<(), RepositoryError> {
        let mut books = self.books.write().await;
        let book = books.get_mut(isbn).ok_or(RepositoryError::NotFound)?;
        changes.apply_to(book);
        Ok(())
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}

#[derive(Default)]
struct CustomerTable {
    last_id: i32,
    rows: BTreeMap<CustomerId, Customer>,
}

/// Customers held in a map keyed by id, with ids assigned from a counter.
#[derive(Default)]
pub struct MemoryCustomerStore {
    table: RwLock<CustomerTable>,
}

impl MemoryCustomerStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored customers.
    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    /// Whether the store holds no customers.
    pub async fn is_empty(&self) -> bool {
        self.table.read().await.rows.is_empty()
    }
}

#[async_trait]
impl CustomerStore for MemoryCustomerStore {
    async fn find_by_id(&self, id: CustomerId) -> Result<Option<Customer>, RepositoryError> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn find_by_user_id(
        &self,
        user_id: &UserId,
    ) -> Result<Option<Customer>, RepositoryError> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .values()
            .find(|customer| &customer.user_id == user_id)
            .cloned())
    }

    async fn insert(&self, customer: &NewCustomer) -> Result<Customer, RepositoryError> {
        let mut table = self.table.write().await;
        if table
            .rows
            .values()
            .any(|existing| existing.user_id == customer.user_id)
        {
            return Err(RepositoryError::Conflict(
                "user ID already exists".to_owned(),
            ));
        }

        // SERIAL starts at 1
        table.last_id += 1;
        let id = CustomerId::new(table.last_id);
        let stored = customer.clone().with_id(id);
        table.rows.insert(id, stored.clone());
        Ok(stored)
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}
