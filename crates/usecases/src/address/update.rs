use serde::Deserialize;

use customerhub_core::{AddressId, AggregateRoot};
use customerhub_customers::{AddressFields, Title};
use customerhub_infra::gateway::AddressGateway;
use customerhub_infra::repository::AddressRepository;

use super::{load_address, resolve_zip_code};
use crate::dto::AddressOutput;
use crate::error::UseCaseResult;

/// Partial update: absent fields keep their current value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAddressInput {
    pub address_id: String,
    pub title: Option<String>,
    pub zip_code: Option<String>,
    pub number: Option<String>,
    pub country: Option<String>,
    pub complement: Option<String>,
}

pub struct UpdateAddress<A, G> {
    addresses: A,
    postal: G,
}

fn same_zip(a: &str, b: &str) -> bool {
    let digits = |s: &str| s.chars().filter(char::is_ascii_digit).collect::<String>();
    digits(a) == digits(b)
}

impl<A, G> UpdateAddress<A, G>
where
    A: AddressRepository,
    G: AddressGateway,
{
    pub fn new(addresses: A, postal: G) -> Self {
        Self { addresses, postal }
    }

    pub fn execute(&self, input: UpdateAddressInput) -> UseCaseResult<AddressOutput> {
        let address_id = AddressId::parse(&input.address_id)?;
        let title = input.title.as_deref().map(Title::new).transpose()?;
        let current = load_address(&self.addresses, address_id)?;
        let mut fields = current.fields().clone();

        if let Some(zip_code) = input.zip_code.filter(|z| !same_zip(z, &fields.zip_code)) {
            let postal = resolve_zip_code(&self.postal, &zip_code)?;
            fields = AddressFields {
                zip_code: postal.zip_code,
                street: postal.street,
                city: postal.city,
                district: postal.district,
                state: postal.state,
                ..fields
            };
        }

        let fields = AddressFields {
            title: title.unwrap_or(fields.title),
            number: input.number.unwrap_or(fields.number),
            country: input.country.unwrap_or(fields.country),
            complement: input.complement.or(fields.complement),
            ..fields
        };

        let saved = self.addresses.save(current.update(fields)?)?;

        tracing::info!(%address_id, version = saved.version(), "address updated");
        Ok(AddressOutput::from(&saved))
    }
}
