use serde::Deserialize;

use customerhub_core::CustomerId;
use customerhub_infra::repository::AddressRepository;
use customerhub_infra::{Page, PageRequest, Settings};

use crate::dto::AddressOutput;
use crate::error::UseCaseResult;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListAddressesInput {
    pub customer_id: String,
    pub search_query: Option<String>,
    pub page: Option<u32>,
    pub size: Option<u32>,
}

/// Page through a customer's addresses. No match is an empty page, not an
/// error.
pub struct ListAddresses<A> {
    addresses: A,
    settings: Settings,
}

impl<A: AddressRepository> ListAddresses<A> {
    pub fn new(addresses: A, settings: &Settings) -> Self {
        Self {
            addresses,
            settings: *settings,
        }
    }

    pub fn execute(&self, input: ListAddressesInput) -> UseCaseResult<Page<AddressOutput>> {
        let customer_id = CustomerId::parse(&input.customer_id)?;
        let request = PageRequest::new(input.page, input.size, &self.settings);

        let page = self.addresses.addresses_by_customer_id(
            customer_id,
            input.search_query.as_deref(),
            request,
        )?;
        Ok(page.map(|a| AddressOutput::from(&a)))
    }
}
