//! Seed the database from YAML files.
//!
//! Each record goes through the same validation and uniqueness checks as an
//! HTTP create. Records whose natural key already exists are skipped with a
//! warning; records that fail validation are logged and counted.

use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::{error, info, warn};

use bookstore_api::models::{CreateBookRequest, CreateCustomerRequest};
use bookstore_api::services::{BookService, CustomerService, ServiceError};
use bookstore_api::state::AppState;

use super::{ConnectError, connect};

/// Errors that stop a seed run.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: String,
        source: serde_yaml::Error,
    },

    #[error(transparent)]
    Connect(#[from] ConnectError),

    #[error("{0} record(s) could not be seeded")]
    Rejected(usize),
}

/// Outcome of a seed run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub inserted: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl SeedSummary {
    fn record<T>(&mut self, index: usize, outcome: Result<T, ServiceError>) {
        match outcome {
            Ok(_) => self.inserted += 1,
            Err(ServiceError::Conflict(message)) => {
                warn!(record = index, "Skipped: {message}");
                self.skipped += 1;
            }
            Err(e) => {
                error!(record = index, error = %e, "Rejected");
                self.failed += 1;
            }
        }
    }

    fn finish(self) -> Result<(), SeedError> {
        info!(
            inserted = self.inserted,
            skipped = self.skipped,
            failed = self.failed,
            "Seeding complete"
        );
        if self.failed > 0 {
            return Err(SeedError::Rejected(self.failed));
        }
        Ok(())
    }
}

/// Seed books from a YAML list.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, the database is
/// unreachable, or any record is rejected.
pub async fn books(path: &Path) -> Result<(), SeedError> {
    let requests: Vec<CreateBookRequest> = load(path).await?;
    let state = AppState::postgres(connect().await?);
    seed_books(&state.book_service(), requests).await.finish()
}

/// Seed customers from a YAML list.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, the database is
/// unreachable, or any record is rejected.
pub async fn customers(path: &Path) -> Result<(), SeedError> {
    let requests: Vec<CreateCustomerRequest> = load(path).await?;
    let state = AppState::postgres(connect().await?);
    seed_customers(&state.customer_service(), requests)
        .await
        .finish()
}

/// Create each book in order.
pub async fn seed_books(
    service: &BookService<'_>,
    requests: Vec<CreateBookRequest>,
) -> SeedSummary {
    let mut summary = SeedSummary::default();
    for (index, request) in requests.into_iter().enumerate() {
        summary.record(index, service.create(request).await);
    }
    summary
}

/// Create each customer in order.
pub async fn seed_customers(
    service: &CustomerService<'_>,
    requests: Vec<CreateCustomerRequest>,
) -> SeedSummary {
    let mut summary = SeedSummary::default();
    for (index, request) in requests.into_iter().enumerate() {
        let outcome = match request.validate() {
            Ok(candidate) => service.create(candidate).await,
            Err(errors) => Err(ServiceError::Validation(errors)),
        };
        summary.record(index, outcome);
    }
    summary
}

async fn load<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, SeedError> {
    let path_text = path.display().to_string();
    info!(path = %path_text, "Loading records from file");

    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| SeedError::Read {
            path: path_text.clone(),
            source,
        })?;
    let records: Vec<T> =
        serde_yaml::from_str(&content).map_err(|source| SeedError::Parse {
            path: path_text,
            source,
        })?;

    info!(records = records.len(), "Parsed file");
    Ok(records)
}
