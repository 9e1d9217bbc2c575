//! Surrogate key newtypes.
//!
//! Surrogate keys are assigned by the store and carry no business meaning.
//! Wrapping them keeps a customer id from being passed where some other
//! integer is expected.

/// Error returned when a path segment or argument is not a valid id.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("numeric string is expected")]
pub struct ParseIdError;

/// Define a surrogate key wrapper around `i32`.
///
/// The generated type is `Copy`, serializes as a bare integer, parses from a
/// decimal string and, with the `postgres` feature, maps to an `INTEGER`
/// column.
///
/// # Example
///
/// ```rust
/// # use bookstore_core::define_id;
/// define_id!(ShelfId);
///
/// let id: ShelfId = "42".parse().unwrap();
/// assert_eq!(id.as_i32(), 42);
/// assert!("forty-two".parse::<ShelfId>().is_err());
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[cfg_attr(feature = "postgres", derive(::sqlx::Type))]
        #[cfg_attr(feature = "postgres", sqlx(transparent))]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Wrap a raw store-assigned value.
            #[must_use]
            pub const fn new(id: i32) -> Self {
                Self(id)
            }

            /// The raw integer value.
            #[must_use]
            pub const fn as_i32(&self) -> i32 {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = $crate::types::id::ParseIdError;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                s.parse::<i32>()
                    .map(Self)
                    .map_err(|_| $crate::types::id::ParseIdError)
            }
        }

        impl From<i32> for $name {
            fn from(id: i32) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id!(CustomerId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_numeric() {
        let id: CustomerId = "17".parse().unwrap();
        assert_eq!(id, CustomerId::new(17));
    }

    #[test]
    fn test_parse_rejects_non_numeric() {
        assert_eq!("abc".parse::<CustomerId>(), Err(ParseIdError));
        assert_eq!("".parse::<CustomerId>(), Err(ParseIdError));
        assert_eq!("1.5".parse::<CustomerId>(), Err(ParseIdError));
    }

    #[test]
    fn test_serializes_as_integer() {
        let json = serde_json::to_string(&CustomerId::new(3)).unwrap();
        assert_eq!(json, "3");
    }
}
