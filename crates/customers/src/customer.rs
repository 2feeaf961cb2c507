use chrono::{DateTime, Utc};

use customerhub_core::{AggregateRoot, CustomerId, UserId};

use crate::{Document, Email, Name, Telephone};

/// Aggregate root: Customer.
///
/// Holds field-level invariants only: every field is a validated value object.
/// Uniqueness of email and document across customers needs a repository round
/// trip and is enforced by the use cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    id: CustomerId,
    user_id: UserId,
    email: Email,
    name: Name,
    document: Option<Document>,
    telephone: Option<Telephone>,
    version: u64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Customer {
    /// A brand-new customer: version 0, no document, no telephone.
    pub fn new(id: CustomerId, user_id: UserId, email: Email, name: Name) -> Self {
        let now = Utc::now();
        Self {
            id,
            user_id,
            email,
            name,
            document: None,
            telephone: None,
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the tax document. Does not check uniqueness.
    pub fn update_document(mut self, document: Document) -> Self {
        self.document = Some(document);
        self.touch();
        self
    }

    /// Replace the telephone with an already canonicalized number.
    pub fn update_telephone(mut self, telephone: Telephone) -> Self {
        self.telephone = Some(telephone);
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

    pub fn id_typed(&self) -> CustomerId {
        self.id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    pub fn telephone(&self) -> Option<&Telephone> {
        self.telephone.as_ref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

impl AggregateRoot for Customer {
    type Id = CustomerId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}
