use serde::{Deserialize, Serialize};

use customerhub_core::{DomainError, DomainResult, ValueObject};

const MIN_LEN: usize = 3;
const MAX_LEN: usize = 100;

/// Customer's personal name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Name {
    first_name: String,
    last_name: String,
}

impl Name {
    pub fn new(first_name: impl AsRef<str>, last_name: impl AsRef<str>) -> DomainResult<Self> {
        Ok(Self {
            first_name: part("first_name", first_name.as_ref())?,
            last_name: part("last_name", last_name.as_ref())?,
        })
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl ValueObject for Name {}

fn part(field: &'static str, raw: &str) -> DomainResult<String> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(DomainError::validation(field, format!("{field} is required")));
    }
    let len = value.chars().count();
    if !(MIN_LEN..=MAX_LEN).contains(&len) {
        return Err(DomainError::validation(
            field,
            format!("{field} must be between {MIN_LEN} and {MAX_LEN} characters"),
        ));
    }
    Ok(value.to_string())
}
