//! Customers domain module (customer identity and shipping addresses).
//!
//! This crate contains the customer and address aggregates and the value
//! objects they are built from, implemented purely as deterministic domain
//! logic (no IO, no HTTP, no storage). Rules that need a repository round trip
//! (uniqueness, address cardinality) live in the use-case layer.

pub mod address;
pub mod customer;
pub mod document;
pub mod email;
pub mod name;
pub mod telephone;
pub mod title;

pub use address::{Address, AddressFields, MAX_ADDRESSES_PER_CUSTOMER};
pub use customer::Customer;
pub use document::{Cnpj, Cpf, Document, DocumentType};
pub use email::Email;
pub use name::Name;
pub use telephone::Telephone;
pub use title::Title;
