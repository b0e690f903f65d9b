use lazy_static::lazy_static;
use regex::Regex;
use std::{fmt, str::FromStr};
use thiserror::Error;

lazy_static! {
    static ref ADDRESS_REGEX: Regex = Regex::new(r"^0x[a-fA-F0-9]{40}$").expect("valid regex");
}

/// Returns `true` when `raw` is `0x` followed by exactly 40 hexadecimal
/// digits, in any case.
pub fn is_valid_address(raw: &str) -> bool {
    ADDRESS_REGEX.is_match(raw)
}

/// A 20-byte account address, stored lowercase with its `0x` prefix.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address(String);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("[E010] '{0}' is not a valid contract address\n\nSuggestions:\n  • Expected format: 0x followed by exactly 40 hexadecimal characters\n  • Example: 0x5FbDB2315678afecb367f032d93F642f64180aa3\n  • Check that the address starts with '0x'")]
    Match(String),
}

impl Address {
    const PREFIX: &'static str = "0x";

    /// # Errors
    ///
    /// Will fail if `raw` is not `0x` followed by 40 hexadecimal digits.
    pub fn new(raw: &str) -> Result<Self, AddressError> {
        if is_valid_address(raw) {
            Ok(Self(raw.to_ascii_lowercase()))
        } else {
            Err(AddressError::Match(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The 40 lowercase hex digits without the `0x` prefix.
    pub fn hex_digits(&self) -> &str {
        &self.0[Self::PREFIX.len()..]
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Address {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIXED: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";

    #[test]
    fn test_valid_lowercase_address() {
        assert!(is_valid_address("0x5fbdb2315678afecb367f032d93f642f64180aa3"));
    }

    #[test]
    fn test_valid_mixed_case_address() {
        assert!(is_valid_address(MIXED));
        assert!(is_valid_address("0xABCDEFABCDEFABCDEFABCDEFABCDEFABCDEFABCD"));
    }

    #[test]
    fn test_invalid_addresses() {
        assert!(!is_valid_address(""));
        assert!(!is_valid_address("0x"));
        assert!(!is_valid_address("0x5FbDB2315678afecb367f032d93F642f64180aa"));
        assert!(!is_valid_address("0x5FbDB2315678afecb367f032d93F642f64180aa3a"));
        assert!(!is_valid_address("5FbDB2315678afecb367f032d93F642f64180aa3"));
        assert!(!is_valid_address("0X5FbDB2315678afecb367f032d93F642f64180aa3"));
        assert!(!is_valid_address("0x5FbDB2315678afecb367f032d93F642f64180aaG"));
        assert!(!is_valid_address(" 0x5FbDB2315678afecb367f032d93F642f64180aa3"));
    }

    #[test]
    fn test_address_is_normalized() {
        let address = Address::new(MIXED).unwrap();
        assert_eq!(
            address.as_str(),
            "0x5fbdb2315678afecb367f032d93f642f64180aa3"
        );
        assert_eq!(
            address.hex_digits(),
            "5fbdb2315678afecb367f032d93f642f64180aa3"
        );
    }

    #[test]
    fn test_address_equality_ignores_case() {
        let upper = Address::new(MIXED).unwrap();
        let lower = Address::new(&MIXED.to_lowercase()).unwrap();
        assert_eq!(upper, lower);
    }

    #[test]
    fn test_address_error_keeps_input() {
        let err = Address::new("nope").unwrap_err();
        assert_eq!(err, AddressError::Match("nope".to_string()));
        assert!(err.to_string().contains("[E010]"));
    }
}
