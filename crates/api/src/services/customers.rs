//! Customer intake workflow.
//!
//! Field-level checks happen before this point: [`NewCustomer`] and
//! [`UserId`] can only be built from input that already passed them.

use bookstore_core::{CustomerId, UserId};

use super::ServiceError;
use crate::db::{CustomerStore, RepositoryError};
use crate::models::{Customer, NewCustomer};

/// Message for a create whose user id is taken.
pub const USER_ID_CONFLICT: &str = "This user ID already exists in the system.";

/// Message for a lookup that finds no customer.
pub const CUSTOMER_NOT_FOUND: &str = "Customer not found";

/// Customer workflows over a borrowed store.
pub struct CustomerService<'a> {
    store: &'a dyn CustomerStore,
}

impl<'a> CustomerService<'a> {
    /// Create a new customer service.
    #[must_use]
    pub const fn new(store: &'a dyn CustomerStore) -> Self {
        Self { store }
    }

    /// Store a new customer.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Conflict` if the user id is already registered.
    /// Returns `ServiceError::Repository` if the store fails.
    pub async fn create(&self, candidate: NewCustomer) -> Result<Customer, ServiceError> {
        if self
            .store
            .find_by_user_id(&candidate.user_id)
            .await?
            .is_some()
        {
            tracing::warn!(user_id = %candidate.user_id, "Rejected customer with existing user ID");
            return Err(ServiceError::Conflict(USER_ID_CONFLICT.to_owned()));
        }

        let customer = self.store.insert(&candidate).await.map_err(|e| match e {
            RepositoryError::Conflict(_) => {
                tracing::warn!(user_id = %candidate.user_id, "User ID taken by a concurrent create");
                ServiceError::Conflict(USER_ID_CONFLICT.to_owned())
            }
            other => ServiceError::Repository(other),
        })?;

        tracing::info!(customer_id = %customer.id, "Customer created");
        Ok(customer)
    }

    /// Get a customer by surrogate id.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` if there is no such customer.
    /// Returns `ServiceError::Repository` if the store fails.
    pub async fn find_by_id(&self, id: CustomerId) -> Result<Customer, ServiceError> {
        tracing::debug!(customer_id = %id, "Looking up customer");
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(CUSTOMER_NOT_FOUND.to_owned()))
    }

    /// Get a customer by user id.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` if there is no such customer.
    /// Returns `ServiceError::Repository` if the store fails.
    pub async fn find_by_user_id(&self, user_id: &UserId) -> Result<Customer, ServiceError> {
        tracing::debug!(%user_id, "Looking up customer by user ID");
        self.store
            .find_by_user_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(CUSTOMER_NOT_FOUND.to_owned()))
    }
}
