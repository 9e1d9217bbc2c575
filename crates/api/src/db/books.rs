//! `PostgreSQL` book store.

use async_trait::async_trait;
use sqlx::PgPool;

use bookstore_core::Isbn;

use super::{BookStore, RepositoryError};
use crate::models::{Book, BookChanges};

/// Book store backed by the `bookstore.book` table.
#[derive(Clone)]
pub struct PgBookStore {
    pool: PgPool,
}

impl PgBookStore {
    /// Create a new book store.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookStore for PgBookStore {
    async fn find_by_isbn(&self, isbn: &Isbn) -> Result<Option<Book>, RepositoryError> {
        let book = sqlx::query_as::<_, Book>(
            r"
            SELECT isbn, title, author, description, genre, price, quantity
            FROM bookstore.book
            WHERE isbn = $1
            ",
        )
        .bind(isbn)
        .fetch_optional(&self.pool)
        .await?;

        Ok(book)
    }

    async fn insert(&self, book: &Book) -> Result<Book, RepositoryError> {
        sqlx::query_as::<_, Book>(
            r"
            INSERT INTO bookstore.book (isbn, title, author, description, genre, price, quantity)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING isbn, title, author, description, genre, price, quantity
            ",
        )
        .bind(&book.isbn)
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.description)
        .bind(&book.genre)
        .bind(book.price)
        .bind(book.quantity)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| RepositoryError::from_insert(e, "ISBN"))
    }

    async fn update(&self, isbn: &Isbn, changes: &BookChanges) -> Result<(), RepositoryError> {
        // Absent fields bind as NULL and COALESCE keeps the stored value.
        let result = sqlx::query(
            r"
            UPDATE bookstore.book
            SET title       = COALESCE($2, title),
                author      = COALESCE($3, author),
                description = COALESCE($4, description),
                genre       = COALESCE($5, genre),
                price       = COALESCE($6, price),
                quantity    = COALESCE($7, quantity)
            WHERE isbn = $1
            ",
        )
        .bind(isbn)
        .bind(changes.title.as_deref())
        .bind(changes.author.as_deref())
        .bind(changes.description.as_deref())
        .bind(changes.genre.as_deref())
        .bind(changes.price)
        .bind(changes.quantity)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
