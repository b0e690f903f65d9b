#![allow(clippy::unwrap_used)]

use reqwest::StatusCode;
use url::Url;
use verifier::abi::{encode_constructor_args, EncodeError};
use verifier::address::Address;
use verifier::api::SubmitError;
use verifier::compiler_version::CompilerVersion;
use verifier::errors::RequestFailure;
use verifier::network::{ConfigError, NetworkId, NetworkRegistry};

#[test]
fn test_request_failure_error_with_status_specific_suggestions() {
    let url = Url::parse("https://api.etherscan.io/api").unwrap();

    let not_found = RequestFailure::new(url.clone(), StatusCode::NOT_FOUND, "Resource not found");
    let error_message = format!("{not_found}");

    assert!(error_message.contains("[E002]"));
    assert!(error_message.contains("404"));
    assert!(error_message.contains("Check that the URL is correct"));
    assert!(error_message.contains("Server response: Resource not found"));

    let rate_limited = RequestFailure::new(url, StatusCode::TOO_MANY_REQUESTS, "Rate limited");
    let rate_limit_message = format!("{rate_limited}");
    assert!(rate_limit_message.contains("Wait a moment before retrying"));
    assert!(rate_limit_message.contains("reducing request frequency"));
}

#[test]
fn test_request_failure_hides_query_string() {
    let url = Url::parse("https://api.etherscan.io/api?apikey=secret&action=getsourcecode").unwrap();
    let failure = RequestFailure::new(url, StatusCode::BAD_GATEWAY, "");

    let error_message = format!("{failure}");

    assert!(error_message.contains("[E001]"));
    assert!(!error_message.contains("secret"));
    assert!(!error_message.contains("Server response"));
    assert!(error_message.contains("try again later"));
}

#[test]
fn test_address_error_with_format_info() {
    let error = Address::new("5FbDB2315678afecb367f032d93F642f64180aa3").unwrap_err();
    let error_message = format!("{error}");

    assert!(error_message.contains("[E010]"));
    assert!(error_message.contains("40 hexadecimal characters"));
    assert!(error_message.contains("starts with '0x'"));
}

#[test]
fn test_compiler_version_error_points_at_compilers_command() {
    let error = CompilerVersion::new("latest").unwrap_err();
    let error_message = format!("{error}");

    assert!(error_message.contains("[E011]"));
    assert!(error_message.contains("evm-verify compilers"));
}

#[test]
fn test_encode_errors_have_codes() {
    let unsupported = encode_constructor_args(&["bool"], &["true"]).unwrap_err();
    assert_eq!(unsupported.error_code(), "E031");
    assert!(unsupported.to_string().contains("--constructor-args"));

    let arity = encode_constructor_args(&["uint256"], &["1", "2"]).unwrap_err();
    assert_eq!(arity, EncodeError::ArityMismatch { types: 1, values: 2 });
    assert!(arity.to_string().starts_with("[E030]"));

    let number = encode_constructor_args(&["uint256"], &["-1"]).unwrap_err();
    assert!(number.to_string().contains("must fit in 256 bits"));
}

#[test]
fn test_missing_credential_names_the_variable() {
    let registry = NetworkRegistry::from_lookup(|_| None).unwrap();
    let error = registry.credential(NetworkId::Optimism).unwrap_err();
    let error_message = format!("{error}");

    assert_eq!(error.error_code(), "E041");
    assert!(error_message.contains("OPTIMISTIC_ETHERSCAN_API_KEY"));
    assert!(error_message.contains(".env"));
}

#[test]
fn test_unsupported_network_lists_choices() {
    let error = "goerli".parse::<NetworkId>().unwrap_err();

    assert!(matches!(error, ConfigError::UnsupportedNetwork(_)));
    assert!(error.to_string().contains("ethereum, polygon, bsc"));
}

#[test]
fn test_submit_error_codes() {
    assert_eq!(SubmitError::EmptySource.error_code(), "E050");
    assert!(SubmitError::EmptySource.to_string().contains("Flatten"));

    let rejected = SubmitError::Rejected {
        message: "Invalid constructor arguments".to_string(),
    };
    assert_eq!(rejected.error_code(), "E052");
    assert!(!rejected.is_validation_error());
}
