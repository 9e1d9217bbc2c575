//! Bookstore Core - Shared domain types.
//!
//! This crate provides the value types used by every bookstore component:
//! - `api` - HTTP service for books and customers
//! - `cli` - Command-line tools for migrations and seeding
//!
//! # Architecture
//!
//! The core crate contains only types and their validation rules - no I/O,
//! no database access, no HTTP. Every type here is valid by construction:
//! once you hold a [`Price`] or a [`UserId`], it has already passed its checks.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ISBNs, prices, user ids, state codes and IDs

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
