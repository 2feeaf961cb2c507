//! Ports to external collaborators reached over the network.
//!
//! Adapters own transport concerns (timeouts, retries, circuit breaking) and
//! report whatever they could not handle as a [`GatewayError`]. The use cases
//! never retry a gateway call.

pub mod in_memory;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use customerhub_core::UserId;
use customerhub_customers::{Email, Name};

pub use in_memory::InMemoryAddressGateway;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// The remote service could not be reached or answered with a server error.
    #[error("gateway unavailable: {0}")]
    Unavailable(String),

    /// The remote service refused the request.
    #[error("gateway rejected request: {0}")]
    Rejected(String),

    /// The remote service answered with something we could not interpret.
    #[error("malformed gateway response: {0}")]
    Malformed(String),
}

/// Postal data resolved from a zip code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostalAddress {
    pub zip_code: String,
    pub city: String,
    pub street: String,
    pub district: String,
    pub state: String,
}

/// Postal code lookup.
pub trait AddressGateway: Send + Sync {
    /// `Ok(None)` when the zip code is unknown.
    fn get_address_by_zip_code(&self, zip_code: &str)
        -> Result<Option<PostalAddress>, GatewayError>;
}

/// A telephone number formatted for display in its own region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalTelephone {
    pub phone_number: String,
    pub country_code: u16,
    pub region_code: String,
}

/// Telephone validation and formatting.
pub trait TelephoneGateway: Send + Sync {
    fn is_valid(&self, number: &str) -> Result<bool, GatewayError>;

    /// Canonical E.164 form, e.g. `+5511987654321`.
    fn format(&self, number: &str) -> Result<String, GatewayError>;

    fn format_to_local(&self, number: &str) -> Result<LocalTelephone, GatewayError>;
}

/// Account to open at the identity provider.
#[derive(Clone, PartialEq, Eq)]
pub struct NewIdentityUser {
    pub email: Email,
    pub name: Name,
    pub password: String,
}

impl core::fmt::Debug for NewIdentityUser {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("NewIdentityUser")
            .field("email", &self.email)
            .field("name", &self.name)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// External identity accounts (login credentials live there, not here).
pub trait IdentityProviderGateway: Send + Sync {
    fn create(&self, user: &NewIdentityUser) -> Result<UserId, GatewayError>;

    fn delete_of_user_id(&self, user_id: UserId) -> Result<(), GatewayError>;
}

impl<S> AddressGateway for Arc<S>
where
    S: AddressGateway + ?Sized,
{
    fn get_address_by_zip_code(
        &self,
        zip_code: &str,
    ) -> Result<Option<PostalAddress>, GatewayError> {
        (**self).get_address_by_zip_code(zip_code)
    }
}

impl<S> TelephoneGateway for Arc<S>
where
    S: TelephoneGateway + ?Sized,
{
    fn is_valid(&self, number: &str) -> Result<bool, GatewayError> {
        (**self).is_valid(number)
    }

    fn format(&self, number: &str) -> Result<String, GatewayError> {
        (**self).format(number)
    }

    fn format_to_local(&self, number: &str) -> Result<LocalTelephone, GatewayError> {
        (**self).format_to_local(number)
    }
}

impl<S> IdentityProviderGateway for Arc<S>
where
    S: IdentityProviderGateway + ?Sized,
{
    fn create(&self, user: &NewIdentityUser) -> Result<UserId, GatewayError> {
        (**self).create(user)
    }

    fn delete_of_user_id(&self, user_id: UserId) -> Result<(), GatewayError> {
        (**self).delete_of_user_id(user_id)
    }
}
