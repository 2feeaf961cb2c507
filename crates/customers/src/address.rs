use chrono::{DateTime, Utc};

use customerhub_core::{AddressId, AggregateRoot, CustomerId, DomainError, DomainResult};

use crate::Title;

/// Business rule: a customer owns at most this many addresses.
pub const MAX_ADDRESSES_PER_CUSTOMER: u64 = 5;

/// Replaceable fields of an address.
///
/// Postal fields (`street`, `city`, `district`, `state`) normally come from
/// the postal lookup; the rest from the customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressFields {
    pub title: Title,
    pub zip_code: String,
    pub number: String,
    pub street: String,
    pub city: String,
    pub district: String,
    pub country: String,
    pub state: String,
    pub complement: Option<String>,
}

impl AddressFields {
    fn validated(self) -> DomainResult<Self> {
        Ok(Self {
            title: self.title,
            zip_code: required("zip_code", self.zip_code)?,
            number: required("number", self.number)?,
            street: required("street", self.street)?,
            city: required("city", self.city)?,
            district: required("district", self.district)?,
            country: required("country", self.country)?,
            state: required("state", self.state)?,
            complement: self
                .complement
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty()),
        })
    }
}

fn required(field: &'static str, value: String) -> DomainResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation(field, format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

/// Aggregate root: Address.
///
/// Refers to its owner by [`CustomerId`] only. Cardinality and default
/// uniqueness span several addresses and are enforced by the use cases, with
/// the store as backstop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    id: AddressId,
    customer_id: CustomerId,
    fields: AddressFields,
    is_default: bool,
    version: u64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Address {
    pub fn new(
        id: AddressId,
        customer_id: CustomerId,
        fields: AddressFields,
        is_default: bool,
    ) -> DomainResult<Self> {
        let now = Utc::now();
        Ok(Self {
            id,
            customer_id,
            fields: fields.validated()?,
            is_default,
            version: 0,
            created_at: now,
            updated_at: now,
        })
    }

    /// Replace every field with `fields`.
    ///
    /// Callers resolve partial updates first (see [`Address::fields`]).
    pub fn update(mut self, fields: AddressFields) -> DomainResult<Self> {
        self.fields = fields.validated()?;
        self.touch();
        Ok(self)
    }

    /// Set the default flag. Unchanged flag returns the address untouched.
    pub fn update_is_default(mut self, is_default: bool) -> Self {
        if self.is_default == is_default {
            return self;
        }
        self.is_default = is_default;
        self.touch();
        self
    }

    /// Stamp the version assigned by storage.
    ///
    /// Persistence adapters only: they call this after their compare-and-swap
    /// succeeds, or when loading a row. Use cases never call it; the version
    /// advances only through a successful repository `save`.
    pub fn with_version(mut self, version: u64) -> Self {
        self.version = version;
        self
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now().max(self.updated_at);
    }

    pub fn id_typed(&self) -> AddressId {
        self.id
    }

    pub fn customer_id(&self) -> CustomerId {
        self.customer_id
    }

    /// Current fields, as a starting point for a partial update.
    pub fn fields(&self) -> &AddressFields {
        &self.fields
    }

    pub fn title(&self) -> &Title {
        &self.fields.title
    }

    pub fn zip_code(&self) -> &str {
        &self.fields.zip_code
    }

    pub fn number(&self) -> &str {
        &self.fields.number
    }

    pub fn street(&self) -> &str {
        &self.fields.street
    }

    pub fn city(&self) -> &str {
        &self.fields.city
    }

    pub fn district(&self) -> &str {
        &self.fields.district
    }

    pub fn country(&self) -> &str {
        &self.fields.country
    }

    pub fn state(&self) -> &str {
        &self.fields.state
    }

    pub fn complement(&self) -> Option<&str> {
        self.fields.complement.as_deref()
    }

    pub fn is_default(&self) -> bool {
        self.is_default
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

impl AggregateRoot for Address {
    type Id = AddressId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}
