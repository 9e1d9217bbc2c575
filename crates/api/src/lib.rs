//! Bookstore API library.
//!
//! HTTP service for a small bookstore backend: books keyed by ISBN and
//! customers keyed by an email-shaped user id. The binary in `main.rs` wires
//! configuration, tracing and Sentry around [`routes::app`]; the CLI and the
//! integration tests reuse the same pieces through this library.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod validation;
