//! Customer user id (an email address).

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`UserId`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum UserIdError {
    /// The input string is empty.
    #[error("userId should not be empty")]
    Empty,
    /// The input string is too long.
    #[error("userId must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains whitespace.
    #[error("userId must be an email")]
    ContainsWhitespace,
    /// The input does not contain exactly one @ symbol.
    #[error("userId must be an email")]
    AtSymbol,
    /// The local part (before @) is empty.
    #[error("userId must be an email")]
    EmptyLocalPart,
    /// The domain part (after @) is not a dotted host name with a top-level domain.
    #[error("userId must be an email")]
    InvalidDomain,
}

/// The natural key of a customer: an email-shaped identifier.
///
/// ## Constraints
///
/// - Length: 1-254 characters (RFC 5321 limit)
/// - No whitespace
/// - Exactly one @ symbol with a non-empty local part
/// - Domain made of non-empty dot-separated labels, ending in an alphabetic
///   top-level domain of at least two letters
///
/// ## Examples
///
/// ```
/// use bookstore_core::UserId;
///
/// assert!(UserId::parse("a@b.com").is_ok());
/// assert!(UserId::parse("user.name+tag@domain.co.uk").is_ok());
///
/// assert!(UserId::parse("").is_err());
/// assert!(UserId::parse("no-at-symbol").is_err());
/// assert!(UserId::parse("user@localhost").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(feature = "postgres", sqlx(transparent))]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Maximum length of an email address (RFC 5321).
    pub const MAX_LENGTH: usize = 254;

    /// Parse a `UserId` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not email-shaped; see the type-level
    /// constraints.
    pub fn parse(s: &str) -> Result<Self, UserIdError> {
        if s.is_empty() {
            return Err(UserIdError::Empty);
        }

        if s.len() > Self::MAX_LENGTH {
            return Err(UserIdError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if s.chars().any(char::is_whitespace) {
            return Err(UserIdError::ContainsWhitespace);
        }

        let (local, domain) = s.split_once('@').ok_or(UserIdError::AtSymbol)?;

        if domain.contains('@') {
            return Err(UserIdError::AtSymbol);
        }

        if local.is_empty() {
            return Err(UserIdError::EmptyLocalPart);
        }

        if !is_valid_domain(domain) {
            return Err(UserIdError::InvalidDomain);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the user id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_valid_domain(domain: &str) -> bool {
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|label| label.is_empty()) {
        return false;
    }

    let hosts_ok = labels
        .iter()
        .all(|label| label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-'));

    let tld_ok = labels
        .last()
        .is_some_and(|tld| tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic()));

    hosts_ok && tld_ok
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for UserId {
    type Err = UserIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
