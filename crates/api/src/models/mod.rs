//! Domain models and inbound request types.
//!
//! Domain types (`Book`, `Customer`) are valid by construction. Request types
//! (`CreateBookRequest`, ...) mirror the JSON clients send and turn into
//! domain types through their `validate` methods.

pub mod book;
pub mod customer;

pub use book::{Book, BookChanges, CreateBookRequest, UpdateBookRequest};
pub use customer::{CreateCustomerRequest, Customer, NewCustomer, UserIdQuery};
