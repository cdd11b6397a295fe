//! CEP (Brazilian postal code) validation.
//!
//! Accepted forms are `NNNNN-NNN` and `NNNNNNNN`. An absent or empty parameter
//! is reported separately from a malformed one so the two can map to
//! different HTTP statuses.

use crate::errors::AppError;
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

fn cep_regex() -> &'static Regex {
    static CEP_REGEX: OnceLock<Regex> = OnceLock::new();
    CEP_REGEX.get_or_init(|| Regex::new(r"^\d{5}-?\d{3}$").expect("CEP pattern is valid"))
}

/// A validated postal code, stored as its 8 digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Zipcode(String);

impl Zipcode {
    /// The 8-digit form sent to the postal lookup provider.
    pub fn digits(&self) -> &str {
        &self.0
    }

    /// The `NNNNN-NNN` display form.
    pub fn formatted(&self) -> String {
        format!("{}-{}", &self.0[..5], &self.0[5..])
    }
}

impl fmt::Display for Zipcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted())
    }
}

/// Returns true when `raw` is `NNNNN-NNN` or `NNNNNNNN` with ASCII digits.
pub fn is_valid_cep(raw: &str) -> bool {
    // `\d` is Unicode-aware, so also insist on ASCII
    raw.is_ascii() && cep_regex().is_match(raw)
}

/// Validates the raw `{cep}` path parameter.
///
/// * `None` or empty → `AppError::MissingZipcode`
/// * present but malformed → `AppError::InvalidZipcode`
pub fn validate_cep(raw: Option<&str>) -> Result<Zipcode, AppError> {
    let raw = match raw {
        Some(value) if !value.is_empty() => value,
        _ => return Err(AppError::MissingZipcode),
    };

    if !is_valid_cep(raw) {
        return Err(AppError::InvalidZipcode(raw.to_string()));
    }

    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    Ok(Zipcode(digits))
}
