//! Caller-facing error taxonomy.
//!
//! Every failure a use case can produce lands in exactly one category so a
//! transport layer can map categories to responses without inspecting
//! messages.

use thiserror::Error;

use customerhub_core::DomainError;
use customerhub_infra::gateway::GatewayError;
use customerhub_infra::repository::{ConstraintViolation, RepositoryError};

pub type UseCaseResult<T> = Result<T, UseCaseError>;

pub const EMAIL_ALREADY_EXISTS: &str = "Email already exists";
pub const DOCUMENT_ALREADY_EXISTS: &str = "Document already exists";
pub const ALREADY_HAS_DEFAULT_ADDRESS: &str = "Customer already has a default address";
pub const INVALID_TELEPHONE: &str = "Invalid telephone";
pub const ADDRESS_OWNER_CANNOT_CHANGE: &str = "Address belongs to another customer";

pub fn address_limit_exceeded(max: u64) -> String {
    format!("Customer can't have more than {max} addresses")
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UseCaseError {
    /// Malformed input. Never retried.
    #[error("{field}: {message}")]
    Validation { field: String, message: String },

    /// Valid input that breaks a business rule.
    #[error("{0}")]
    BusinessRule(String),

    /// A referenced record does not exist.
    #[error("{0}")]
    NotFound(String),

    /// A required input was missing (caller bug).
    #[error("required input missing: {0}")]
    NullInput(String),

    /// Lost an optimistic concurrency race. Safe to retry from a fresh read.
    #[error("conflict: {0}")]
    Conflict(String),

    /// A collaborator failed (storage, network).
    #[error("internal error: {0}")]
    Internal(String),
}

impl UseCaseError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn business_rule(msg: impl Into<String>) -> Self {
        Self::BusinessRule(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, UseCaseError::Conflict(_))
    }
}

impl From<DomainError> for UseCaseError {
    fn from(value: DomainError) -> Self {
        match value {
            DomainError::Validation { field, message } => UseCaseError::Validation { field, message },
            DomainError::BusinessRule(msg) => UseCaseError::BusinessRule(msg),
            DomainError::InvalidId(msg) => UseCaseError::validation("id", msg),
            DomainError::NullInput(what) => UseCaseError::NullInput(what),
            DomainError::NotFound(msg) => UseCaseError::NotFound(msg),
            DomainError::Conflict(msg) => UseCaseError::Conflict(msg),
        }
    }
}

impl From<RepositoryError> for UseCaseError {
    fn from(value: RepositoryError) -> Self {
        match value {
            RepositoryError::Conflict(msg) => UseCaseError::Conflict(msg),
            RepositoryError::Constraint(violation) => violation.into(),
            RepositoryError::Unavailable(_) => UseCaseError::Internal(value.to_string()),
        }
    }
}

/// A lost check-then-act race reads exactly like the up-front check.
impl From<ConstraintViolation> for UseCaseError {
    fn from(value: ConstraintViolation) -> Self {
        let msg = match value {
            ConstraintViolation::DuplicateEmail => EMAIL_ALREADY_EXISTS.to_string(),
            ConstraintViolation::DuplicateDocument => DOCUMENT_ALREADY_EXISTS.to_string(),
            ConstraintViolation::DefaultAddressTaken => ALREADY_HAS_DEFAULT_ADDRESS.to_string(),
            ConstraintViolation::AddressLimit(max) => address_limit_exceeded(max),
            ConstraintViolation::OwnerChanged => ADDRESS_OWNER_CANNOT_CHANGE.to_string(),
        };
        UseCaseError::BusinessRule(msg)
    }
}

impl From<GatewayError> for UseCaseError {
    fn from(value: GatewayError) -> Self {
        UseCaseError::Internal(value.to_string())
    }
}
