use std::collections::HashMap;
use std::sync::RwLock;

use super::{AddressGateway, GatewayError, PostalAddress};

/// Fixed postal directory for tests/dev.
///
/// Zip codes are matched on their digits, so `01310-100` and `01310100` are
/// the same key.
#[derive(Debug, Default)]
pub struct InMemoryAddressGateway {
    entries: RwLock<HashMap<String, PostalAddress>>,
}

impl InMemoryAddressGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: impl IntoIterator<Item = PostalAddress>) -> Self {
        let map = entries
            .into_iter()
            .map(|entry| (key(&entry.zip_code), entry))
            .collect();
        Self {
            entries: RwLock::new(map),
        }
    }

    /// Add or replace the entry for `entry.zip_code`.
    pub fn insert(&self, entry: PostalAddress) -> Result<(), GatewayError> {
        let mut map = self.entries.write().map_err(|_| poisoned())?;
        map.insert(key(&entry.zip_code), entry);
        Ok(())
    }
}

fn poisoned() -> GatewayError {
    GatewayError::Unavailable("lock poisoned".to_string())
}

fn key(zip_code: &str) -> String {
    zip_code.chars().filter(char::is_ascii_digit).collect()
}

impl AddressGateway for InMemoryAddressGateway {
    fn get_address_by_zip_code(
        &self,
        zip_code: &str,
    ) -> Result<Option<PostalAddress>, GatewayError> {
        let map = self.entries.read().map_err(|_| poisoned())?;
        Ok(map.get(&key(zip_code)).cloned())
    }
}
