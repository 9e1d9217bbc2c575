//! Book domain types and the requests that create or change them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use bookstore_core::{Isbn, Price};

use crate::validation::{ValidationErrors, integer, optional_text, present, required_text};

/// A book in the catalogue (domain type).
///
/// Serialized with the field names clients already use (`ISBN`, `Author`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Book {
    /// Natural key; never changes once the book is created.
    #[serde(rename = "ISBN")]
    pub isbn: Isbn,
    pub title: String,
    #[serde(rename = "Author")]
    pub author: String,
    pub description: String,
    pub genre: String,
    /// Always positive, at most two decimals.
    pub price: Price,
    pub quantity: i32,
}

/// The fields a partial update may change.
///
/// `None` means "keep the stored value". The ISBN is not here: it cannot be
/// changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookChanges {
    pub title: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
    pub genre: Option<String>,
    pub price: Option<Price>,
    pub quantity: Option<i32>,
}

impl BookChanges {
    /// Whether the update carries no field at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.description.is_none()
            && self.genre.is_none()
            && self.price.is_none()
            && self.quantity.is_none()
    }

    /// Apply the present fields to `book`, leaving the rest untouched.
    pub fn apply_to(&self, book: &mut Book) {
        if let Some(title) = &self.title {
            book.title.clone_from(title);
        }
        if let Some(author) = &self.author {
            book.author.clone_from(author);
        }
        if let Some(description) = &self.description {
            book.description.clone_from(description);
        }
        if let Some(genre) = &self.genre {
            book.genre.clone_from(genre);
        }
        if let Some(price) = self.price {
            book.price = price;
        }
        if let Some(quantity) = self.quantity {
            book.quantity = quantity;
        }
    }
}

/// Body of `POST /books`.
///
/// Every field is optional at the serde level so that missing fields are
/// reported by [`CreateBookRequest::validate`] together with the other
/// failures, not as an opaque deserialization error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateBookRequest {
    #[serde(rename = "ISBN", alias = "isbn")]
    pub isbn: Option<String>,
    pub title: Option<String>,
    #[serde(rename = "Author", alias = "author")]
    pub author: Option<String>,
    pub description: Option<String>,
    pub genre: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub price: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub quantity: Option<Value>,
}

impl CreateBookRequest {
    /// Validate the request into a complete [`Book`].
    ///
    /// # Errors
    ///
    /// Returns every failed field check.
    pub fn validate(self) -> Result<Book, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let isbn = required_text(&mut errors, "ISBN", self.isbn)
            .and_then(|s| Isbn::parse(&s).map_err(|e| errors.push(e.to_string())).ok());
        let title = required_text(&mut errors, "title", self.title);
        let author = required_text(&mut errors, "Author", self.author);
        let description = required_text(&mut errors, "description", self.description);
        let genre = required_text(&mut errors, "genre", self.genre);
        let price = validate_price(&mut errors, self.price.as_ref().unwrap_or(&Value::Null));
        let quantity = integer(
            &mut errors,
            "quantity",
            self.quantity.as_ref().unwrap_or(&Value::Null),
        );

        errors.finish(|| {
            Some(Book {
                isbn: isbn?,
                title: title?,
                author: author?,
                description: description?,
                genre: genre?,
                price: price?,
                quantity: quantity?,
            })
        })
    }
}

/// Body of `PUT /books/{isbn}`: any subset of the book's fields.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateBookRequest {
    #[serde(rename = "ISBN", alias = "isbn", default, deserialize_with = "present")]
    pub isbn: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub title: Option<Value>,
    #[serde(rename = "Author", alias = "author", default, deserialize_with = "present")]
    pub author: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub genre: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub price: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub quantity: Option<Value>,
}

impl UpdateBookRequest {
    /// Validate the present fields into a [`BookChanges`].
    ///
    /// The payload may repeat the book's own ISBN; any other ISBN is rejected
    /// because the ISBN is the primary key.
    ///
    /// # Errors
    ///
    /// Returns every failed field check.
    pub fn validate(self, target: &Isbn) -> Result<BookChanges, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Some(isbn) = optional_text(&mut errors, "ISBN", self.isbn)
            && isbn != target.as_str()
        {
            errors.push("ISBN cannot be changed");
        }

        let title = optional_text(&mut errors, "title", self.title);
        let author = optional_text(&mut errors, "Author", self.author);
        let description = optional_text(&mut errors, "description", self.description);
        let genre = optional_text(&mut errors, "genre", self.genre);
        let price = self
            .price
            .as_ref()
            .and_then(|value| validate_price(&mut errors, value));
        let quantity = self
            .quantity
            .as_ref()
            .and_then(|value| integer(&mut errors, "quantity", value));

        errors.finish(|| {
            Some(BookChanges {
                title,
                author,
                description,
                genre,
                price,
                quantity,
            })
        })
    }
}

/// Largest amount the `NUMERIC(12, 2)` price column holds: 9999999999.99.
const MAX_PRICE: Decimal = Decimal::from_parts(0xD4A5_0FFF, 0xE8, 0, false, 2);

/// Format rule from [`Price::from_json`] plus the range rules for books.
fn validate_price(errors: &mut ValidationErrors, value: &Value) -> Option<Price> {
    match Price::from_json(value) {
        Ok(price) if !price.is_positive() => {
            errors.push("price must be a positive number");
            None
        }
        Ok(price) if price.amount() > MAX_PRICE => {
            errors.push(format!("price must not be greater than {MAX_PRICE}"));
            None
        }
        Ok(price) => Some(price),
        Err(e) => {
            errors.push(e.to_string());
            None
        }
    }
}
