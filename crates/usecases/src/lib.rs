//! Application layer: the customer and address workflows.
//!
//! Each use case is a small struct generic over the ports it needs. A call
//! takes a plain input record, loads aggregates through the repositories,
//! applies aggregate methods, consults gateways, persists, and returns a plain
//! output record. Everything runs synchronously on the caller's thread.
//!
//! ## Check-then-act
//!
//! The address cardinality and single-default checks read the store and the
//! write happens later, with no transaction spanning both. Two concurrent
//! requests for the same customer can both pass the checks. The checks here
//! are the fast path; the store's own constraints are the guarantee (see
//! `customerhub_infra::repository`).

pub mod address;
pub mod customer;
pub mod dto;
pub mod error;

#[cfg(test)]
pub(crate) mod testing;

pub use address::{
    CreateAddress, CreateAddressInput, DeleteAddress, GetAddressById, GetDefaultAddress,
    ListAddresses, ListAddressesInput, UpdateAddress, UpdateAddressDefault,
    UpdateAddressDefaultInput, UpdateAddressInput,
};
pub use customer::{
    CreateCustomer, CreateCustomerInput, GetCustomerById, GetCustomerByUserId,
    UpdateCustomerDocument, UpdateCustomerDocumentInput, UpdateCustomerTelephone,
    UpdateCustomerTelephoneInput, UpdateCustomerTelephoneOutput,
};
pub use dto::{AddressOutput, CustomerOutput, DocumentOutput};
pub use error::{UseCaseError, UseCaseResult};
