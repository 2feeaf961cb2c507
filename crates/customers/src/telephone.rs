use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use customerhub_core::{DomainError, DomainResult, ValueObject};

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9]{8,15}$").expect("telephone pattern is valid"));

/// Telephone number stripped of presentation characters.
///
/// Only the shape is checked here. Whether the number is actually dialable,
/// and its canonical E.164 form, is decided by the telephone gateway.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Telephone(String);

impl Telephone {
    pub fn new(value: impl AsRef<str>) -> DomainResult<Self> {
        let cleaned: String = value
            .as_ref()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '(' | ')' | '.'))
            .collect();
        if cleaned.is_empty() {
            return Err(DomainError::validation("telephone", "Telephone is required"));
        }
        if !PHONE_RE.is_match(&cleaned) {
            return Err(DomainError::validation("telephone", "Invalid telephone"));
        }
        Ok(Self(cleaned))
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl ValueObject for Telephone {}

impl TryFrom<String> for Telephone {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Telephone> for String {
    fn from(value: Telephone) -> Self {
        value.0
    }
}
