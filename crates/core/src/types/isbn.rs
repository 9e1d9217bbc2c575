//! ISBN natural key.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing an [`Isbn`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum IsbnError {
    /// The input is empty or whitespace only.
    #[error("ISBN should not be empty")]
    Empty,
    /// The input is longer than the column allows.
    #[error("ISBN must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
}

/// The natural key of a book.
///
/// The store uses it as the primary key, so it never changes once a book is
/// created. No checksum is enforced: catalogues carry ISBN-10, ISBN-13 and
/// internal SKUs side by side, and all of them are accepted as opaque text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(feature = "postgres", sqlx(transparent))]
#[serde(transparent)]
pub struct Isbn(String);

impl Isbn {
    /// Maximum length, matching the `VARCHAR(255)` key column.
    pub const MAX_LENGTH: usize = 255;

    /// Parse an `Isbn` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is blank or longer than
    /// [`Isbn::MAX_LENGTH`].
    pub fn parse(s: &str) -> Result<Self, IsbnError> {
        if s.trim().is_empty() {
            return Err(IsbnError::Empty);
        }
        if s.len() > Self::MAX_LENGTH {
            return Err(IsbnError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }
        Ok(Self(s.to_owned()))
    }

    /// Returns the ISBN as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Isbn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Isbn {
    type Err = IsbnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Isbn {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
