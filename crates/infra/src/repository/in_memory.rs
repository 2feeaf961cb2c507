use std::collections::HashMap;
use std::sync::RwLock;

use customerhub_core::{AddressId, AggregateRoot, CustomerId, ExpectedVersion, UserId};
use customerhub_customers::{Address, Customer, Email};

use super::{AddressRepository, ConstraintViolation, CustomerRepository, RepositoryError};
use crate::config::Settings;
use crate::pagination::{Page, PageRequest};

fn poisoned() -> RepositoryError {
    RepositoryError::Unavailable("lock poisoned".to_string())
}

/// Version check shared by both stores. Absent rows are at version 0.
fn guard_version(incoming: u64, stored: Option<u64>) -> Result<u64, RepositoryError> {
    let current = stored.unwrap_or(0);
    if !ExpectedVersion::Exact(incoming).matches(current) {
        return Err(RepositoryError::Conflict(format!(
            "expected version {incoming}, found {current}"
        )));
    }
    Ok(current + 1)
}

/// In-memory customer store.
///
/// Intended for tests/dev. Enforces email and document uniqueness under the
/// same lock as the version check.
#[derive(Debug, Default)]
pub struct InMemoryCustomerRepository {
    rows: RwLock<HashMap<CustomerId, Customer>>,
}

impl InMemoryCustomerRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CustomerRepository for InMemoryCustomerRepository {
    fn next_id(&self) -> CustomerId {
        CustomerId::new()
    }

    fn exists_by_email(&self, email: &Email) -> Result<bool, RepositoryError> {
        let rows = self.rows.read().map_err(|_| poisoned())?;
        Ok(rows.values().any(|c| c.email() == email))
    }

    fn exists_by_document(&self, value: &str) -> Result<bool, RepositoryError> {
        let rows = self.rows.read().map_err(|_| poisoned())?;
        Ok(rows
            .values()
            .any(|c| c.document().is_some_and(|d| d.value() == value)))
    }

    fn save(&self, customer: Customer) -> Result<Customer, RepositoryError> {
        let mut rows = self.rows.write().map_err(|_| poisoned())?;
        let id = customer.id_typed();

        let next = guard_version(customer.version(), rows.get(&id).map(|c| c.version()))?;

        for other in rows.values().filter(|c| c.id_typed() != id) {
            if other.email() == customer.email() {
                return Err(RepositoryError::Constraint(ConstraintViolation::DuplicateEmail));
            }
            if let (Some(a), Some(b)) = (other.document(), customer.document()) {
                if a.value() == b.value() {
                    return Err(RepositoryError::Constraint(
                        ConstraintViolation::DuplicateDocument,
                    ));
                }
            }
        }

        let stored = customer.with_version(next);
        rows.insert(id, stored.clone());
        Ok(stored)
    }

    fn customer_of_id(&self, id: CustomerId) -> Result<Option<Customer>, RepositoryError> {
        let rows = self.rows.read().map_err(|_| poisoned())?;
        Ok(rows.get(&id).cloned())
    }

    fn customer_of_user_id(&self, user_id: UserId) -> Result<Option<Customer>, RepositoryError> {
        let rows = self.rows.read().map_err(|_| poisoned())?;
        Ok(rows.values().find(|c| c.user_id() == user_id).cloned())
    }
}

/// In-memory address store.
///
/// Intended for tests/dev. Plays the role of the store-level backstop: at
/// most one default address and at most `max_addresses` addresses per
/// customer, checked under the same lock as the write.
#[derive(Debug)]
pub struct InMemoryAddressRepository {
    rows: RwLock<HashMap<AddressId, Address>>,
    max_addresses: u64,
}

impl Default for InMemoryAddressRepository {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}

impl InMemoryAddressRepository {
    pub fn new(settings: &Settings) -> Self {
        Self {
            rows: RwLock::new(HashMap::new()),
            max_addresses: settings.max_addresses,
        }
    }

    fn matches(address: &Address, needle: &str) -> bool {
        [
            address.title().value(),
            address.street(),
            address.city(),
            address.district(),
            address.zip_code(),
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
    }
}

impl AddressRepository for InMemoryAddressRepository {
    fn save(&self, address: Address) -> Result<Address, RepositoryError> {
        let mut rows = self.rows.write().map_err(|_| poisoned())?;
        let id = address.id_typed();
        let customer_id = address.customer_id();
        let existing = rows.get(&id);

        let next = guard_version(address.version(), existing.map(|a| a.version()))?;

        if existing.is_some_and(|a| a.customer_id() != customer_id) {
            return Err(RepositoryError::Constraint(ConstraintViolation::OwnerChanged));
        }

        let (sibling_count, sibling_default) = rows
            .values()
            .filter(|a| a.customer_id() == customer_id && a.id_typed() != id)
            .fold((0u64, false), |(count, default), a| {
                (count + 1, default || a.is_default())
            });

        if address.is_default() && sibling_default {
            return Err(RepositoryError::Constraint(
                ConstraintViolation::DefaultAddressTaken,
            ));
        }

        if existing.is_none() && sibling_count >= self.max_addresses {
            return Err(RepositoryError::Constraint(ConstraintViolation::AddressLimit(
                self.max_addresses,
            )));
        }

        let stored = address.with_version(next);
        rows.insert(id, stored.clone());
        Ok(stored)
    }

    fn count_by_customer_id(&self, customer_id: CustomerId) -> Result<u64, RepositoryError> {
        let rows = self.rows.read().map_err(|_| poisoned())?;
        Ok(rows.values().filter(|a| a.customer_id() == customer_id).count() as u64)
    }

    fn exists_by_customer_id_and_is_default_true(
        &self,
        customer_id: CustomerId,
    ) -> Result<bool, RepositoryError> {
        Ok(self
            .address_by_customer_id_and_is_default_true(customer_id)?
            .is_some())
    }

    fn address_of_id(&self, id: AddressId) -> Result<Option<Address>, RepositoryError> {
        let rows = self.rows.read().map_err(|_| poisoned())?;
        Ok(rows.get(&id).cloned())
    }

    fn address_by_customer_id_and_is_default_true(
        &self,
        customer_id: CustomerId,
    ) -> Result<Option<Address>, RepositoryError> {
        let rows = self.rows.read().map_err(|_| poisoned())?;
        Ok(rows
            .values()
            .find(|a| a.customer_id() == customer_id && a.is_default())
            .cloned())
    }

    fn addresses_by_customer_id(
        &self,
        customer_id: CustomerId,
        search_query: Option<&str>,
        page: PageRequest,
    ) -> Result<Page<Address>, RepositoryError> {
        let rows = self.rows.read().map_err(|_| poisoned())?;
        let needle = search_query
            .map(|q| q.trim().to_lowercase())
            .filter(|q| !q.is_empty());

        let mut matching: Vec<Address> = rows
            .values()
            .filter(|a| a.customer_id() == customer_id)
            .filter(|a| needle.as_deref().is_none_or(|n| Self::matches(a, n)))
            .cloned()
            .collect();
        matching.sort_by_key(|a| (a.created_at(), *a.id_typed().as_uuid()));

        Ok(Page::slice(matching, page))
    }

    fn delete(&self, id: AddressId) -> Result<(), RepositoryError> {
        let mut rows = self.rows.write().map_err(|_| poisoned())?;
        rows.remove(&id);
        Ok(())
    }
}
