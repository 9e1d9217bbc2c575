//! Domain value types for the bookstore.
//!
//! This module provides type-safe wrappers for the natural keys and
//! constrained fields of books and customers.

pub mod id;
pub mod isbn;
pub mod price;
pub mod state;
pub mod user_id;

pub use id::*;
pub use isbn::{Isbn, IsbnError};
pub use price::{Price, PriceError};
pub use state::{StateCode, StateCodeError};
pub use user_id::{UserId, UserIdError};
