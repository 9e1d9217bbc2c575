//! Book intake workflow.

use bookstore_core::Isbn;

use super::ServiceError;
use crate::db::{BookStore, RepositoryError};
use crate::models::{Book, CreateBookRequest, UpdateBookRequest};

/// Message for a create whose ISBN is taken.
pub const ISBN_CONFLICT: &str = "This ISBN already exists in the system.";

/// Message for a lookup or update of an unknown ISBN.
pub const BOOK_NOT_FOUND: &str = "Book not found";

/// Book workflows over a borrowed store.
pub struct BookService<'a> {
    store: &'a dyn BookStore,
}

impl<'a> BookService<'a> {
    /// Create a new book service.
    #[must_use]
    pub const fn new(store: &'a dyn BookStore) -> Self {
        Self { store }
    }

    /// Validate and store a new book.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Validation` if any field is invalid (including
    /// the price format).
    /// Returns `ServiceError::Conflict` if a book with this ISBN exists.
    /// Returns `ServiceError::Repository` if the store fails.
    pub async fn create(&self, request: CreateBookRequest) -> Result<Book, ServiceError> {
        let candidate = request.validate()?;

        if self.store.find_by_isbn(&candidate.isbn).await?.is_some() {
            tracing::warn!(isbn = %candidate.isbn, "Rejected book with existing ISBN");
            return Err(ServiceError::Conflict(ISBN_CONFLICT.to_owned()));
        }

        // A concurrent create can slip in between the check and the insert;
        // the primary key catches it and it is reported the same way.
        let book = self.store.insert(&candidate).await.map_err(|e| match e {
            RepositoryError::Conflict(_) => {
                tracing::warn!(isbn = %candidate.isbn, "ISBN taken by a concurrent create");
                ServiceError::Conflict(ISBN_CONFLICT.to_owned())
            }
            other => ServiceError::Repository(other),
        })?;

        tracing::info!(isbn = %book.isbn, "Book created");
        Ok(book)
    }

    /// Get a book by ISBN.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` if there is no such book.
    /// Returns `ServiceError::Repository` if the store fails.
    pub async fn find_by_isbn(&self, isbn: &Isbn) -> Result<Book, ServiceError> {
        tracing::debug!(%isbn, "Looking up book");
        self.store
            .find_by_isbn(isbn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(BOOK_NOT_FOUND.to_owned()))
    }

    /// Apply a partial update and return the book as stored afterwards.
    ///
    /// Validation runs before the store is touched, so a rejected update
    /// leaves the record unchanged.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Validation` if a present field is invalid or the
    /// payload tries to change the ISBN.
    /// Returns `ServiceError::NotFound` if there is no such book.
    /// Returns `ServiceError::Repository` if the store fails.
    pub async fn update(
        &self,
        isbn: &Isbn,
        request: UpdateBookRequest,
    ) -> Result<Book, ServiceError> {
        let changes = request.validate(isbn)?;

        let existing = self.find_by_isbn(isbn).await?;
        if changes.is_empty() {
            return Ok(existing);
        }

        self.store
            .update(isbn, &changes)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => ServiceError::NotFound(BOOK_NOT_FOUND.to_owned()),
                other => ServiceError::Repository(other),
            })?;

        let updated = self.find_by_isbn(isbn).await?;
        tracing::info!(%isbn, "Book updated");
        Ok(updated)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use async_trait::async_trait;
    use serde_json::{Value, json};

    use bookstore_core::Price;

    use super::*;
    use crate::db::MemoryBookStore;
    use crate::models::BookChanges;

    fn create_request(body: Value) -> CreateBookRequest {
        serde_json::from_value(body).unwrap()
    }

    fn update_request(body: Value) -> UpdateBookRequest {
        serde_json::from_value(body).unwrap()
    }

    fn scenario_book() -> Value {
        json!({
            "ISBN": "111",
            "title": "T",
            "Author": "A",
            "description": "D",
            "genre": "G",
            "price": 19.99,
            "quantity": 5
        })
    }

    fn isbn(s: &str) -> Isbn {
        Isbn::parse(s).unwrap()
    }

    #[tokio::test]
    async fn test_create_then_find() {
        let store = MemoryBookStore::new();
        let service = BookService::new(&store);

        let created = service.create(create_request(scenario_book())).await.unwrap();
        assert_eq!(created.isbn.as_str(), "111");

        let found = service.find_by_isbn(&isbn("111")).await.unwrap();
        assert_eq!(found, created);
    }

    #[tokio::test]
    async fn test_create_negative_price_is_validation_error() {
        let store = MemoryBookStore::new();
        let service = BookService::new(&store);

        let mut body = scenario_book();
        body["price"] = json!(-1);
        let err = service.create(create_request(body)).await.unwrap_err();

        assert!(matches!(err, ServiceError::Validation(_)));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_create_duplicate_isbn_is_conflict() {
        let store = MemoryBookStore::new();
        let service = BookService::new(&store);

        service.create(create_request(scenario_book())).await.unwrap();
        let err = service
            .create(create_request(scenario_book()))
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::Conflict(ref msg) if msg == ISBN_CONFLICT));
    }

    #[tokio::test]
    async fn test_invalid_price_wins_over_conflict() {
        let store = MemoryBookStore::new();
        let service = BookService::new(&store);
        service.create(create_request(scenario_book())).await.unwrap();

        let mut body = scenario_book();
        body["price"] = json!(1.005);
        let err = service.create(create_request(body)).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn test_update_price_keeps_other_fields() {
        let store = MemoryBookStore::new();
        let service = BookService::new(&store);
        let created = service.create(create_request(scenario_book())).await.unwrap();

        let updated = service
            .update(&isbn("111"), update_request(json!({"price": 25.00})))
            .await
            .unwrap();
        assert_eq!(updated.price, Price::parse("25.00").unwrap());

        let found = service.find_by_isbn(&isbn("111")).await.unwrap();
        assert_eq!(found.price, Price::parse("25.00").unwrap());
        assert_eq!(found.title, created.title);
        assert_eq!(found.author, created.author);
        assert_eq!(found.description, created.description);
        assert_eq!(found.genre, created.genre);
        assert_eq!(found.quantity, created.quantity);
    }

    #[tokio::test]
    async fn test_update_invalid_price_leaves_record_unchanged() {
        let store = MemoryBookStore::new();
        let service = BookService::new(&store);
        let created = service.create(create_request(scenario_book())).await.unwrap();

        let err = service
            .update(
                &isbn("111"),
                update_request(json!({"price": 9.999, "title": "Changed"})),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));

        let found = service.find_by_isbn(&isbn("111")).await.unwrap();
        assert_eq!(found, created);
    }

    #[tokio::test]
    async fn test_update_missing_book_is_not_found() {
        let store = MemoryBookStore::new();
        let service = BookService::new(&store);

        let err = service
            .update(&isbn("404"), update_request(json!({"price": 10})))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_cannot_change_isbn() {
        let store = MemoryBookStore::new();
        let service = BookService::new(&store);
        service.create(create_request(scenario_book())).await.unwrap();

        let err = service
            .update(&isbn("111"), update_request(json!({"ISBN": "222"})))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert!(service.find_by_isbn(&isbn("111")).await.is_ok());
        assert!(matches!(
            service.find_by_isbn(&isbn("222")).await,
            Err(ServiceError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_empty_update_returns_existing() {
        let store = MemoryBookStore::new();
        let service = BookService::new(&store);
        let created = service.create(create_request(scenario_book())).await.unwrap();

        let same = service
            .update(&isbn("111"), update_request(json!({})))
            .await
            .unwrap();
        assert_eq!(same, created);
    }

    #[tokio::test]
    async fn test_find_missing_is_not_found() {
        let store = MemoryBookStore::new();
        let service = BookService::new(&store);
        let err = service.find_by_isbn(&isbn("nope")).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(ref msg) if msg == BOOK_NOT_FOUND));
    }

    /// Store whose existence check never sees the competing insert.
    struct RacingStore;

    #[async_trait]
    impl BookStore for RacingStore {
        async fn find_by_isbn(&self, _: &Isbn) -> Result<Option<Book>, RepositoryError> {
            Ok(None)
        }

        async fn insert(&self, _: &Book) -> Result<Book, RepositoryError> {
            Err(RepositoryError::Conflict("ISBN already exists".into()))
        }

        async fn update(&self, _: &Isbn, _: &BookChanges) -> Result<(), RepositoryError> {
            Err(RepositoryError::NotFound)
        }

        async fn ping(&self) -> Result<(), RepositoryError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_lost_race_is_still_conflict() {
        let store = RacingStore;
        let service = BookService::new(&store);
        let err = service
            .create(create_request(scenario_book()))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
    }
}
