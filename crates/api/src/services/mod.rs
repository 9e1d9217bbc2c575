//! Intake and lookup workflows.
//!
//! Each write runs the same single-attempt sequence and stops at the first
//! failing stage:
//!
//! ```text
//! RECEIVED -> VALIDATED -> CONFLICT_CHECKED -> PERSISTED
//!     \___________\_______________\____________> REJECTED
//! ```
//!
//! Services hold no state of their own: they borrow a store for the duration
//! of a request and re-read it before every decision.

pub mod books;
pub mod customers;
mod error;

pub use books::BookService;
pub use customers::CustomerService;
pub use error::ServiceError;
