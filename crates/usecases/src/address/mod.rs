//! Address workflows.

pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;
pub mod update_default;

pub use create::{CreateAddress, CreateAddressInput};
pub use delete::DeleteAddress;
pub use get::{GetAddressById, GetDefaultAddress};
pub use list::{ListAddresses, ListAddressesInput};
pub use update::{UpdateAddress, UpdateAddressInput};
pub use update_default::{UpdateAddressDefault, UpdateAddressDefaultInput};

use customerhub_core::AddressId;
use customerhub_customers::Address;
use customerhub_infra::gateway::{AddressGateway, PostalAddress};
use customerhub_infra::repository::AddressRepository;

use crate::error::{UseCaseError, UseCaseResult};

pub(crate) const ADDRESS_NOT_FOUND: &str = "Address not found";

pub(crate) fn load_address<A: AddressRepository>(
    addresses: &A,
    id: AddressId,
) -> UseCaseResult<Address> {
    addresses
        .address_of_id(id)?
        .ok_or_else(|| UseCaseError::not_found(ADDRESS_NOT_FOUND))
}

pub(crate) fn resolve_zip_code<G: AddressGateway>(
    postal: &G,
    zip_code: &str,
) -> UseCaseResult<PostalAddress> {
    postal
        .get_address_by_zip_code(zip_code)?
        .ok_or_else(|| UseCaseError::not_found(format!("Address not found for zip code {zip_code}")))
}
