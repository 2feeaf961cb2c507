//! Brazilian tax documents: CPF (individuals) and CNPJ (companies).
//!
//! Both carry two trailing mod-11 check digits. Input may arrive formatted
//! (`479.993.810-04`, `11.222.333/0001-81`); everything but digits is stripped
//! before validation.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use customerhub_core::{DomainError, DomainResult, ValueObject};

const CPF_LEN: usize = 11;
const CNPJ_LEN: usize = 14;

/// Discriminant of a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    Cpf,
    Cnpj,
}

impl DocumentType {
    pub fn as_str(self) -> &'static str {
        match self {
            DocumentType::Cpf => "cpf",
            DocumentType::Cnpj => "cnpj",
        }
    }
}

impl FromStr for DocumentType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cpf" => Ok(DocumentType::Cpf),
            "cnpj" => Ok(DocumentType::Cnpj),
            _ => Err(DomainError::validation("document_type", "Invalid document type")),
        }
    }
}

impl core::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Individual taxpayer registry number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Cpf(String);

impl Cpf {
    pub fn new(number: impl AsRef<str>) -> DomainResult<Self> {
        let digits = clean(number.as_ref());
        if !is_valid_cpf(&digits) {
            return Err(DomainError::validation("document", "Invalid CPF"));
        }
        Ok(Self(digits))
    }

    pub fn value(&self) -> &str {
        &self.0
    }

    /// `###.###.###-##`
    pub fn formatted_value(&self) -> String {
        let d = &self.0;
        format!("{}.{}.{}-{}", &d[0..3], &d[3..6], &d[6..9], &d[9..11])
    }
}

/// Company taxpayer registry number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Cnpj(String);

impl Cnpj {
    pub fn new(number: impl AsRef<str>) -> DomainResult<Self> {
        let digits = clean(number.as_ref());
        if !is_valid_cnpj(&digits) {
            return Err(DomainError::validation("document", "Invalid CNPJ"));
        }
        Ok(Self(digits))
    }

    pub fn value(&self) -> &str {
        &self.0
    }

    /// `##.###.###/####-##`
    pub fn formatted_value(&self) -> String {
        let d = &self.0;
        format!(
            "{}.{}.{}/{}-{}",
            &d[0..2],
            &d[2..5],
            &d[5..8],
            &d[8..12],
            &d[12..14]
        )
    }
}

/// Tax document attached to a customer. Closed set of variants.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Document {
    Cpf(Cpf),
    Cnpj(Cnpj),
}

impl Document {
    /// Build a document from a raw number and a case-insensitive type tag.
    ///
    /// The tag is resolved before the number is looked at, so an unknown type
    /// is reported as such even when the number is also malformed.
    pub fn create(number: impl AsRef<str>, document_type: &str) -> DomainResult<Self> {
        match document_type.parse::<DocumentType>()? {
            DocumentType::Cpf => Ok(Document::Cpf(Cpf::new(number)?)),
            DocumentType::Cnpj => Ok(Document::Cnpj(Cnpj::new(number)?)),
        }
    }

    /// Digits only.
    pub fn value(&self) -> &str {
        match self {
            Document::Cpf(cpf) => cpf.value(),
            Document::Cnpj(cnpj) => cnpj.value(),
        }
    }

    pub fn formatted_value(&self) -> String {
        match self {
            Document::Cpf(cpf) => cpf.formatted_value(),
            Document::Cnpj(cnpj) => cnpj.formatted_value(),
        }
    }

    pub fn document_type(&self) -> DocumentType {
        match self {
            Document::Cpf(_) => DocumentType::Cpf,
            Document::Cnpj(_) => DocumentType::Cnpj,
        }
    }
}

impl ValueObject for Document {}

fn clean(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

fn to_digits(s: &str) -> Vec<u32> {
    s.chars().filter_map(|c| c.to_digit(10)).collect()
}

fn all_same(digits: &[u32]) -> bool {
    digits.windows(2).all(|w| w[0] == w[1])
}

/// Mod-11 check digit over `digits` weighted by `weights` (same length).
fn check_digit(digits: &[u32], weights: &[u32]) -> u32 {
    let sum: u32 = digits.iter().zip(weights).map(|(d, w)| d * w).sum();
    match sum % 11 {
        r if r < 2 => 0,
        r => 11 - r,
    }
}

fn is_valid_cpf(digits: &str) -> bool {
    if digits.len() != CPF_LEN {
        return false;
    }
    let d = to_digits(digits);
    if all_same(&d) {
        return false;
    }
    let first = check_digit(&d[..9], &[10, 9, 8, 7, 6, 5, 4, 3, 2]);
    let second = check_digit(&d[..10], &[11, 10, 9, 8, 7, 6, 5, 4, 3, 2]);
    d[9] == first && d[10] == second
}

fn is_valid_cnpj(digits: &str) -> bool {
    if digits.len() != CNPJ_LEN {
        return false;
    }
    let d = to_digits(digits);
    if all_same(&d) {
        return false;
    }
    let first = check_digit(&d[..12], &[5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2]);
    let second = check_digit(&d[..13], &[6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2]);
    d[12] == first && d[13] == second
}
