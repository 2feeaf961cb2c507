//! Output records returned to callers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use customerhub_core::AggregateRoot;
use customerhub_customers::{Address, Customer, Document, DocumentType};

// -------------------------
// Customers
// -------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentOutput {
    pub value: String,
    pub formatted_value: String,
    pub document_type: DocumentType,
}

impl From<&Document> for DocumentOutput {
    fn from(d: &Document) -> Self {
        Self {
            value: d.value().to_string(),
            formatted_value: d.formatted_value(),
            document_type: d.document_type(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerOutput {
    pub id: Uuid,
    pub user_id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub document: Option<DocumentOutput>,
    pub telephone: Option<String>,
    pub version: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Customer> for CustomerOutput {
    fn from(c: &Customer) -> Self {
        Self {
            id: c.id_typed().into(),
            user_id: c.user_id().into(),
            email: c.email().value().to_string(),
            first_name: c.name().first_name().to_string(),
            last_name: c.name().last_name().to_string(),
            document: c.document().map(DocumentOutput::from),
            telephone: c.telephone().map(|t| t.value().to_string()),
            version: c.version(),
            created_at: c.created_at(),
            updated_at: c.updated_at(),
        }
    }
}

// -------------------------
// Addresses
// -------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressOutput {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub title: String,
    pub zip_code: String,
    pub number: String,
    pub street: String,
    pub city: String,
    pub district: String,
    pub country: String,
    pub state: String,
    pub complement: Option<String>,
    pub is_default: bool,
    pub version: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Address> for AddressOutput {
    fn from(a: &Address) -> Self {
        Self {
            id: a.id_typed().into(),
            customer_id: a.customer_id().into(),
            title: a.title().value().to_string(),
            zip_code: a.zip_code().to_string(),
            number: a.number().to_string(),
            street: a.street().to_string(),
            city: a.city().to_string(),
            district: a.district().to_string(),
            country: a.country().to_string(),
            state: a.state().to_string(),
            complement: a.complement().map(str::to_string),
            is_default: a.is_default(),
            version: a.version(),
            created_at: a.created_at(),
            updated_at: a.updated_at(),
        }
    }
}
