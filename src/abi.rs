//! Constructor-argument encoding for the three primitive ABI types the
//! explorers are commonly asked to verify: `uint256`, `address` and
//! `string`.
//!
//! Every argument occupies whole 32-byte words, written in argument
//! order after a single `0x` prefix.
//!
//! `string` is written in place as a length word followed by its
//! right-padded UTF-8 bytes. This is *not* the head/tail layout the full
//! ABI uses for dynamic types (there is no offset word), so constructors
//! that take a `string` next to other arguments will generally not match
//! what `solc` produced. Pass pre-encoded hex for those contracts.

use num_bigint::BigUint;
use std::{fmt, str::FromStr};
use thiserror::Error;

use crate::address::Address;

/// Hex characters in one 32-byte ABI word.
const WORD_HEX_LEN: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbiType {
    Uint256,
    Address,
    String,
}

impl FromStr for AbiType {
    type Err = EncodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "uint256" => Ok(Self::Uint256),
            "address" => Ok(Self::Address),
            "string" => Ok(Self::String),
            other => Err(EncodeError::UnsupportedType(other.to_string())),
        }
    }
}

impl fmt::Display for AbiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uint256 => write!(f, "uint256"),
            Self::Address => write!(f, "address"),
            Self::String => write!(f, "string"),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("[E030] Got {types} constructor argument types but {values} values")]
    ArityMismatch { types: usize, values: usize },

    #[error("[E031] Unsupported constructor argument type '{0}'\n\nSuggestions:\n  • Supported types are uint256, address and string\n  • Pass pre-encoded arguments with --constructor-args for other types")]
    UnsupportedType(String),

    #[error("[E032] '{0}' is not a valid uint256\n\nSuggestions:\n  • Use a non-negative decimal integer, e.g. 1000000000000000000\n  • The value must fit in 256 bits")]
    InvalidNumber(String),

    #[error("[E033] '{0}' is not a valid address argument")]
    InvalidAddress(String),

    #[error("[E034] Expected a TYPE=VALUE argument, got '{0}'")]
    MalformedArgument(String),
}

impl EncodeError {
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::ArityMismatch { .. } => "E030",
            Self::UnsupportedType(_) => "E031",
            Self::InvalidNumber(_) => "E032",
            Self::InvalidAddress(_) => "E033",
            Self::MalformedArgument(_) => "E034",
        }
    }
}

/// Encodes constructor arguments into the hex blob explorers expect.
///
/// Returns an empty string when there are no arguments, and a
/// `0x`-prefixed string otherwise. Type tags are all checked before any
/// value is looked at.
///
/// # Errors
///
/// `ArityMismatch` when the slices differ in length, `UnsupportedType`
/// for unknown tags, and `InvalidNumber` / `InvalidAddress` for values
/// that do not fit their tag.
pub fn encode_constructor_args<T, V>(types: &[T], values: &[V]) -> Result<String, EncodeError>
where
    T: AsRef<str>,
    V: AsRef<str>,
{
    if types.len() != values.len() {
        return Err(EncodeError::ArityMismatch {
            types: types.len(),
            values: values.len(),
        });
    }

    if types.is_empty() {
        return Ok(String::new());
    }

    let tags = types
        .iter()
        .map(|t| t.as_ref().parse::<AbiType>())
        .collect::<Result<Vec<_>, _>>()?;

    let mut encoded = String::from("0x");
    for (tag, value) in tags.into_iter().zip(values) {
        encoded.push_str(&encode_value(tag, value.as_ref())?);
    }

    Ok(encoded)
}

/// Encodes one value as whole ABI words, without a `0x` prefix.
///
/// # Errors
///
/// Fails when `value` is not valid for `tag`.
pub fn encode_value(tag: AbiType, value: &str) -> Result<String, EncodeError> {
    match tag {
        AbiType::Uint256 => encode_uint256(value),
        AbiType::Address => encode_address(value),
        AbiType::String => Ok(encode_string(value)),
    }
}

fn encode_uint256(value: &str) -> Result<String, EncodeError> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(EncodeError::InvalidNumber(value.to_string()));
    }

    let number = BigUint::parse_bytes(value.as_bytes(), 10)
        .ok_or_else(|| EncodeError::InvalidNumber(value.to_string()))?;
    if number.bits() > 256 {
        return Err(EncodeError::InvalidNumber(value.to_string()));
    }

    Ok(left_pad(&number.to_str_radix(16)))
}

fn encode_address(value: &str) -> Result<String, EncodeError> {
    let address =
        Address::new(value).map_err(|_| EncodeError::InvalidAddress(value.to_string()))?;
    Ok(left_pad(address.hex_digits()))
}

fn encode_string(value: &str) -> String {
    let bytes = value.as_bytes();
    let mut data = hex::encode(bytes);
    let remainder = data.len() % WORD_HEX_LEN;
    if remainder != 0 {
        data.push_str(&"0".repeat(WORD_HEX_LEN - remainder));
    }

    format!("{:064x}{data}", bytes.len())
}

fn left_pad(digits: &str) -> String {
    format!("{digits:0>WORD_HEX_LEN$}")
}

/// Splits a `TYPE=VALUE` token at the first `=`.
///
/// # Errors
///
/// Fails when the token has no `=` or an empty type.
pub fn parse_typed_arg(raw: &str) -> Result<(String, String), EncodeError> {
    match raw.split_once('=') {
        Some((tag, value)) if !tag.trim().is_empty() => {
            Ok((tag.trim().to_string(), value.to_string()))
        }
        _ => Err(EncodeError::MalformedArgument(raw.to_string())),
    }
}

/// Encodes a list of `TYPE=VALUE` tokens, as taken on the command line.
///
/// # Errors
///
/// `MalformedArgument` for tokens without `=`, then anything
/// [`encode_constructor_args`] reports.
pub fn encode_typed_args<S: AsRef<str>>(args: &[S]) -> Result<String, EncodeError> {
    let (types, values): (Vec<String>, Vec<String>) = args
        .iter()
        .map(|arg| parse_typed_arg(arg.as_ref()))
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .unzip();

    encode_constructor_args(&types, &values)
}
