use customerhub_core::{AddressId, CustomerId};
use customerhub_infra::repository::AddressRepository;

use super::load_address;
use crate::dto::AddressOutput;
use crate::error::{UseCaseError, UseCaseResult};

pub struct GetAddressById<A> {
    addresses: A,
}

impl<A: AddressRepository> GetAddressById<A> {
    pub fn new(addresses: A) -> Self {
        Self { addresses }
    }

    pub fn execute(&self, address_id: &str) -> UseCaseResult<AddressOutput> {
        let address = load_address(&self.addresses, AddressId::parse(address_id)?)?;
        Ok(AddressOutput::from(&address))
    }
}

pub struct GetDefaultAddress<A> {
    addresses: A,
}

impl<A: AddressRepository> GetDefaultAddress<A> {
    pub fn new(addresses: A) -> Self {
        Self { addresses }
    }

    pub fn execute(&self, customer_id: &str) -> UseCaseResult<AddressOutput> {
        let customer_id = CustomerId::parse(customer_id)?;
        let address = self
            .addresses
            .address_by_customer_id_and_is_default_true(customer_id)?
            .ok_or_else(|| UseCaseError::not_found("Default address not found"))?;
        Ok(AddressOutput::from(&address))
    }
}
