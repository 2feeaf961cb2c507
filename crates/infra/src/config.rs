//! Configuration loading and representation.

use core::str::FromStr;

use customerhub_customers::MAX_ADDRESSES_PER_CUSTOMER;

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;

/// Runtime settings shared by repositories and use cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    /// Maximum addresses a customer may own.
    pub max_addresses: u64,
    /// Page size used when a list request names none.
    pub default_page_size: u32,
    /// Upper bound for any requested page size.
    pub max_page_size: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_addresses: MAX_ADDRESSES_PER_CUSTOMER,
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
        }
    }
}

impl Settings {
    /// Read settings from `CUSTOMERHUB_*` environment variables.
    ///
    /// Missing variables use the defaults; unparseable ones are logged and
    /// ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let max_page_size = parse_or(&lookup, "CUSTOMERHUB_MAX_PAGE_SIZE", defaults.max_page_size).max(1);
        Self {
            max_addresses: parse_or(&lookup, "CUSTOMERHUB_MAX_ADDRESSES", defaults.max_addresses),
            default_page_size: parse_or(&lookup, "CUSTOMERHUB_DEFAULT_PAGE_SIZE", defaults.default_page_size)
                .clamp(1, max_page_size),
            max_page_size,
        }
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + Copy + core::fmt::Display,
{
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, %default, "ignoring unparseable setting");
            default
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn missing_variables_use_defaults() {
        assert_eq!(Settings::from_lookup(lookup(&[])), Settings::default());
        assert_eq!(Settings::default().max_addresses, 5);
    }

    #[test]
    fn reads_overrides() {
        let settings = Settings::from_lookup(lookup(&[
            ("CUSTOMERHUB_MAX_ADDRESSES", "3"),
            ("CUSTOMERHUB_DEFAULT_PAGE_SIZE", "10"),
            ("CUSTOMERHUB_MAX_PAGE_SIZE", "50"),
        ]));
        assert_eq!(settings.max_addresses, 3);
        assert_eq!(settings.default_page_size, 10);
        assert_eq!(settings.max_page_size, 50);
    }

    #[test]
    fn garbage_falls_back_and_default_page_fits_max() {
        let settings = Settings::from_lookup(lookup(&[
            ("CUSTOMERHUB_MAX_ADDRESSES", "many"),
            ("CUSTOMERHUB_DEFAULT_PAGE_SIZE", "500"),
            ("CUSTOMERHUB_MAX_PAGE_SIZE", "40"),
        ]));
        assert_eq!(settings.max_addresses, 5);
        assert_eq!(settings.default_page_size, 40);
    }
}
