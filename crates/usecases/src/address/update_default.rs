use serde::Deserialize;

use customerhub_core::{AddressId, AggregateRoot};
use customerhub_infra::repository::AddressRepository;

use super::load_address;
use crate::dto::AddressOutput;
use crate::error::UseCaseResult;

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateAddressDefaultInput {
    pub address_id: String,
    pub is_default: bool,
}

/// Make an address the customer's default, or clear its default flag.
///
/// | current | requested | writes |
/// |---|---|---|
/// | same | same | none |
/// | false | true | previous default cleared, then target set |
/// | true | false | target cleared |
///
/// Clearing the previous default first keeps the store's single-default
/// constraint satisfied between the two writes.
pub struct UpdateAddressDefault<A> {
    addresses: A,
}

impl<A: AddressRepository> UpdateAddressDefault<A> {
    pub fn new(addresses: A) -> Self {
        Self { addresses }
    }

    pub fn execute(&self, input: UpdateAddressDefaultInput) -> UseCaseResult<AddressOutput> {
        let address_id = AddressId::parse(&input.address_id)?;
        let target = load_address(&self.addresses, address_id)?;

        let saved = match (target.is_default(), input.is_default) {
            (true, true) | (false, false) => {
                tracing::debug!(%address_id, is_default = input.is_default, "default flag unchanged");
                return Ok(AddressOutput::from(&target));
            }
            (false, true) => {
                let customer_id = target.customer_id();
                if let Some(previous) = self
                    .addresses
                    .address_by_customer_id_and_is_default_true(customer_id)?
                {
                    let previous = self.addresses.save(previous.update_is_default(false))?;
                    tracing::info!(%customer_id, address_id = %previous.id_typed(), "previous default address cleared");
                }
                self.addresses.save(target.update_is_default(true))?
            }
            (true, false) => self.addresses.save(target.update_is_default(false))?,
        };

        tracing::info!(
            %address_id,
            is_default = saved.is_default(),
            version = saved.version(),
            "address default flag updated"
        );
        Ok(AddressOutput::from(&saved))
    }
}
