//! Customer workflows.

pub mod create;
pub mod get;
pub mod update_document;
pub mod update_telephone;

pub use create::{CreateCustomer, CreateCustomerInput};
pub use get::{GetCustomerById, GetCustomerByUserId};
pub use update_document::{UpdateCustomerDocument, UpdateCustomerDocumentInput};
pub use update_telephone::{
    UpdateCustomerTelephone, UpdateCustomerTelephoneInput, UpdateCustomerTelephoneOutput,
};

use customerhub_core::CustomerId;
use customerhub_customers::Customer;
use customerhub_infra::repository::CustomerRepository;

use crate::error::{UseCaseError, UseCaseResult};

pub(crate) const CUSTOMER_NOT_FOUND: &str = "Customer not found";

pub(crate) fn load_customer<C: CustomerRepository>(
    customers: &C,
    id: CustomerId,
) -> UseCaseResult<Customer> {
    customers
        .customer_of_id(id)?
        .ok_or_else(|| UseCaseError::not_found(CUSTOMER_NOT_FOUND))
}
