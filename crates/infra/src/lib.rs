//! Infrastructure layer: persistence and gateway ports, in-memory adapters,
//! configuration.
//!
//! The ports are the only way the use cases reach storage or the network.
//! SQL adapters and network clients implement them out of tree; the in-memory
//! adapters here back development and tests.

pub mod config;
pub mod gateway;
pub mod pagination;
pub mod repository;

pub use config::Settings;
pub use pagination::{Page, PageRequest};
