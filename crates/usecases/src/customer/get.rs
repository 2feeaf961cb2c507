use customerhub_core::{CustomerId, UserId};
use customerhub_infra::repository::CustomerRepository;

use super::{CUSTOMER_NOT_FOUND, load_customer};
use crate::dto::CustomerOutput;
use crate::error::{UseCaseError, UseCaseResult};

pub struct GetCustomerById<C> {
    customers: C,
}

impl<C: CustomerRepository> GetCustomerById<C> {
    pub fn new(customers: C) -> Self {
        Self { customers }
    }

    pub fn execute(&self, customer_id: &str) -> UseCaseResult<CustomerOutput> {
        let id = CustomerId::parse(customer_id)?;
        let customer = load_customer(&self.customers, id)?;
        Ok(CustomerOutput::from(&customer))
    }
}

/// Resolve the customer behind an identity-provider account.
pub struct GetCustomerByUserId<C> {
    customers: C,
}

impl<C: CustomerRepository> GetCustomerByUserId<C> {
    pub fn new(customers: C) -> Self {
        Self { customers }
    }

    pub fn execute(&self, user_id: &str) -> UseCaseResult<CustomerOutput> {
        let user_id = UserId::parse(user_id)?;
        let customer = self
            .customers
            .customer_of_user_id(user_id)?
            .ok_or_else(|| UseCaseError::not_found(CUSTOMER_NOT_FOUND))?;
        Ok(CustomerOutput::from(&customer))
    }
}
