use customerhub_core::AddressId;
use customerhub_infra::repository::AddressRepository;

use super::load_address;
use crate::error::UseCaseResult;

/// Remove an address. Deleting the default address leaves the customer with
/// no default until one is chosen again.
pub struct DeleteAddress<A> {
    addresses: A,
}

impl<A: AddressRepository> DeleteAddress<A> {
    pub fn new(addresses: A) -> Self {
        Self { addresses }
    }

    pub fn execute(&self, address_id: &str) -> UseCaseResult<()> {
        let address_id = AddressId::parse(address_id)?;
        let address = load_address(&self.addresses, address_id)?;
        self.addresses.delete(address_id)?;

        tracing::info!(
            %address_id,
            customer_id = %address.customer_id(),
            was_default = address.is_default(),
            "address deleted"
        );
        Ok(())
    }
}
