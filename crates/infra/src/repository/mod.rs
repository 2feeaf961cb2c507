//! Persistence ports for the customer and address aggregates.
//!
//! ## Write semantics
//!
//! `save` is a compare-and-swap on the aggregate version: it succeeds only if
//! the stored version equals the version carried by the aggregate (an absent
//! row counts as version 0). The stored row and the returned aggregate carry
//! `version + 1`. A mismatch yields [`RepositoryError::Conflict`] and nothing
//! is written; callers reload and retry, or give up.
//!
//! A SQL adapter expresses this as `UPDATE … WHERE id = :id AND version =
//! :expected` and reports a conflict on zero affected rows. Stores are also
//! expected to carry backstop constraints for the rules the use cases check
//! ahead of time (one default address per customer, bounded address count,
//! unique email and document); violations surface as
//! [`RepositoryError::Constraint`].

pub mod in_memory;

use std::sync::Arc;

use thiserror::Error;

use customerhub_core::{AddressId, CustomerId, UserId};
use customerhub_customers::{Address, Customer, Email};

use crate::pagination::{Page, PageRequest};

pub use in_memory::{InMemoryAddressRepository, InMemoryCustomerRepository};

/// Repository operation error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// Stored version differs from the version read (retryable).
    #[error("optimistic concurrency check failed: {0}")]
    Conflict(String),

    /// A store-level uniqueness or cardinality constraint rejected the write.
    #[error("constraint violated: {0}")]
    Constraint(ConstraintViolation),

    /// The store could not be reached or is in a bad state.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Which backstop constraint rejected a write.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintViolation {
    #[error("email already taken")]
    DuplicateEmail,

    #[error("document already taken")]
    DuplicateDocument,

    #[error("customer already has a default address")]
    DefaultAddressTaken,

    /// Carries the configured maximum.
    #[error("address limit of {0} reached")]
    AddressLimit(u64),

    #[error("address owner cannot change")]
    OwnerChanged,
}

pub trait CustomerRepository: Send + Sync {
    fn next_id(&self) -> CustomerId;

    fn exists_by_email(&self, email: &Email) -> Result<bool, RepositoryError>;

    /// `value` is the digits-only document number.
    fn exists_by_document(&self, value: &str) -> Result<bool, RepositoryError>;

    fn save(&self, customer: Customer) -> Result<Customer, RepositoryError>;

    fn customer_of_id(&self, id: CustomerId) -> Result<Option<Customer>, RepositoryError>;

    fn customer_of_user_id(&self, user_id: UserId) -> Result<Option<Customer>, RepositoryError>;
}

pub trait AddressRepository: Send + Sync {
    fn save(&self, address: Address) -> Result<Address, RepositoryError>;

    fn count_by_customer_id(&self, customer_id: CustomerId) -> Result<u64, RepositoryError>;

    fn exists_by_customer_id_and_is_default_true(
        &self,
        customer_id: CustomerId,
    ) -> Result<bool, RepositoryError>;

    fn address_of_id(&self, id: AddressId) -> Result<Option<Address>, RepositoryError>;

    fn address_by_customer_id_and_is_default_true(
        &self,
        customer_id: CustomerId,
    ) -> Result<Option<Address>, RepositoryError>;

    /// Addresses of a customer, oldest first, optionally narrowed by a
    /// case-insensitive search over title, street, city, district and zip code.
    fn addresses_by_customer_id(
        &self,
        customer_id: CustomerId,
        search_query: Option<&str>,
        page: PageRequest,
    ) -> Result<Page<Address>, RepositoryError>;

    /// Deleting a missing address is not an error.
    fn delete(&self, id: AddressId) -> Result<(), RepositoryError>;
}

impl<S> CustomerRepository for Arc<S>
where
    S: CustomerRepository + ?Sized,
{
    fn next_id(&self) -> CustomerId {
        (**self).next_id()
    }

    fn exists_by_email(&self, email: &Email) -> Result<bool, RepositoryError> {
        (**self).exists_by_email(email)
    }

    fn exists_by_document(&self, value: &str) -> Result<bool, RepositoryError> {
        (**self).exists_by_document(value)
    }

    fn save(&self, customer: Customer) -> Result<Customer, RepositoryError> {
        (**self).save(customer)
    }

    fn customer_of_id(&self, id: CustomerId) -> Result<Option<Customer>, RepositoryError> {
        (**self).customer_of_id(id)
    }

    fn customer_of_user_id(&self, user_id: UserId) -> Result<Option<Customer>, RepositoryError> {
        (**self).customer_of_user_id(user_id)
    }
}

impl<S> AddressRepository for Arc<S>
where
    S: AddressRepository + ?Sized,
{
    fn save(&self, address: Address) -> Result<Address, RepositoryError> {
        (**self).save(address)
    }

    fn count_by_customer_id(&self, customer_id: CustomerId) -> Result<u64, RepositoryError> {
        (**self).count_by_customer_id(customer_id)
    }

    fn exists_by_customer_id_and_is_default_true(
        &self,
        customer_id: CustomerId,
    ) -> Result<bool, RepositoryError> {
        (**self).exists_by_customer_id_and_is_default_true(customer_id)
    }

    fn address_of_id(&self, id: AddressId) -> Result<Option<Address>, RepositoryError> {
        (**self).address_of_id(id)
    }

    fn address_by_customer_id_and_is_default_true(
        &self,
        customer_id: CustomerId,
    ) -> Result<Option<Address>, RepositoryError> {
        (**self).address_by_customer_id_and_is_default_true(customer_id)
    }

    fn addresses_by_customer_id(
        &self,
        customer_id: CustomerId,
        search_query: Option<&str>,
        page: PageRequest,
    ) -> Result<Page<Address>, RepositoryError> {
        (**self).addresses_by_customer_id(customer_id, search_query, page)
    }

    fn delete(&self, id: AddressId) -> Result<(), RepositoryError> {
        (**self).delete(id)
    }
}
