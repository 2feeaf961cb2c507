use serde::Deserialize;

use customerhub_core::{AddressId, AggregateRoot, CustomerId};
use customerhub_customers::{Address, AddressFields, Title};
use customerhub_infra::Settings;
use customerhub_infra::gateway::AddressGateway;
use customerhub_infra::repository::AddressRepository;

use super::resolve_zip_code;
use crate::dto::AddressOutput;
use crate::error::{
    ALREADY_HAS_DEFAULT_ADDRESS, UseCaseError, UseCaseResult, address_limit_exceeded,
};

#[derive(Debug, Clone, Deserialize)]
pub struct CreateAddressInput {
    pub customer_id: String,
    pub title: String,
    pub zip_code: String,
    pub number: String,
    pub country: String,
    pub complement: Option<String>,
    #[serde(default)]
    pub is_default: bool,
}

/// Add an address to a customer's address book.
///
/// Street, city, district and state come from the postal lookup; the
/// customer supplies the rest.
pub struct CreateAddress<A, G> {
    addresses: A,
    postal: G,
    max_addresses: u64,
}

impl<A, G> CreateAddress<A, G>
where
    A: AddressRepository,
    G: AddressGateway,
{
    pub fn new(addresses: A, postal: G, settings: &Settings) -> Self {
        Self {
            addresses,
            postal,
            max_addresses: settings.max_addresses,
        }
    }

    pub fn execute(&self, input: CreateAddressInput) -> UseCaseResult<AddressOutput> {
        let customer_id = CustomerId::parse(&input.customer_id)?;
        let title = Title::new(&input.title)?;

        if self.addresses.count_by_customer_id(customer_id)? >= self.max_addresses {
            tracing::warn!(%customer_id, max = self.max_addresses, "address limit reached");
            return Err(UseCaseError::business_rule(address_limit_exceeded(
                self.max_addresses,
            )));
        }

        if input.is_default
            && self
                .addresses
                .exists_by_customer_id_and_is_default_true(customer_id)?
        {
            tracing::warn!(%customer_id, "default address already set");
            return Err(UseCaseError::business_rule(ALREADY_HAS_DEFAULT_ADDRESS));
        }

        let postal = resolve_zip_code(&self.postal, &input.zip_code)?;

        let address = Address::new(
            AddressId::new(),
            customer_id,
            AddressFields {
                title,
                zip_code: postal.zip_code,
                number: input.number,
                street: postal.street,
                city: postal.city,
                district: postal.district,
                country: input.country,
                state: postal.state,
                complement: input.complement,
            },
            input.is_default,
        )?;
        let saved = self.addresses.save(address)?;

        tracing::info!(
            %customer_id,
            address_id = %saved.id_typed(),
            is_default = saved.is_default(),
            version = saved.version(),
            "address created"
        );
        Ok(AddressOutput::from(&saved))
    }
}
