use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;
use thiserror::Error;

lazy_static! {
    static ref VERSION_REGEX: Regex = Regex::new(
        r"^v?\d+\.\d+\.\d+(-nightly\.\d{4}\.\d{1,2}\.\d{1,2})?(\+commit\.[a-fA-F0-9]{8})?$"
    )
    .expect("valid regex");
}

pub fn is_valid_compiler_version(raw: &str) -> bool {
    VERSION_REGEX.is_match(raw)
}

/// Solidity compiler version in the long form explorers expect,
/// e.g. `v0.8.19+commit.7dd6d404`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerVersion(String);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompilerVersionError {
    #[error("[E011] '{0}' is not a valid compiler version\n\nSuggestions:\n  • Use the full solc version, e.g. v0.8.19+commit.7dd6d404\n  • Run `evm-verify compilers` to list versions the explorer accepts")]
    Match(String),
}

impl CompilerVersion {
    /// # Errors
    ///
    /// Fails unless `raw` looks like `[v]MAJOR.MINOR.PATCH` with optional
    /// nightly and commit segments.
    pub fn new(raw: &str) -> Result<Self, CompilerVersionError> {
        if !is_valid_compiler_version(raw) {
            return Err(CompilerVersionError::Match(raw.to_string()));
        }

        if raw.starts_with('v') {
            Ok(Self(raw.to_string()))
        } else {
            Ok(Self(format!("v{raw}")))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CompilerVersion {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for CompilerVersion {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_version_is_accepted() {
        let version = CompilerVersion::new("v0.8.19+commit.7dd6d404").unwrap();
        assert_eq!(version.as_str(), "v0.8.19+commit.7dd6d404");
    }

    #[test]
    fn test_missing_prefix_is_added() {
        let version = CompilerVersion::new("0.8.19+commit.7dd6d404").unwrap();
        assert_eq!(version.to_string(), "v0.8.19+commit.7dd6d404");
    }

    #[test]
    fn test_short_and_nightly_versions() {
        assert!(is_valid_compiler_version("0.8.19"));
        assert!(is_valid_compiler_version(
            "v0.4.24-nightly.2018.4.26+commit.ef2111a2"
        ));
    }

    #[test]
    fn test_invalid_versions() {
        assert!(!is_valid_compiler_version(""));
        assert!(!is_valid_compiler_version("v0.8"));
        assert!(!is_valid_compiler_version("latest"));
        assert!(!is_valid_compiler_version("v0.8.19+commit.7dd6d4"));
        assert!(!is_valid_compiler_version("v0.8.19+commit.7dd6d404 "));
        assert!(CompilerVersion::new("0.8.x").is_err());
    }
}
