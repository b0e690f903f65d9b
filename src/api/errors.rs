use thiserror::Error;

use super::transport::TransportError;
use crate::{address::AddressError, errors::RequestFailure, network::ConfigError};

/// Why a source submission didn't produce a job.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    InvalidAddress(#[from] AddressError),

    #[error("[E050] Source code is empty\n\nSuggestions:\n  • Flatten the contract into a single file before submitting\n  • Check the --source path")]
    EmptySource,

    #[error("[E051] Couldn't reach the explorer: {0}\n\nSuggestions:\n  • Check your network connection\n  • Try again later, the explorer may be overloaded")]
    Network(#[from] TransportError),

    #[error(transparent)]
    Api(#[from] RequestFailure),

    #[error("[E052] Explorer rejected the submission: {message}")]
    Rejected { message: String },

    #[error("[E053] Couldn't read explorer response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("[E057] Explorer accepted the submission but returned no job id (result: {0})\n\nSuggestions:\n  • Check the contract page on the explorer before submitting again\n  • The explorer may not support the verifysourcecode action")]
    MissingGuid(String),
}

impl SubmitError {
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.error_code(),
            Self::InvalidAddress(_) => "E010",
            Self::EmptySource => "E050",
            Self::Network(_) => "E051",
            Self::Api(f) => f.error_code().as_str(),
            Self::Rejected { .. } => "E052",
            Self::Decode(_) => "E053",
            Self::MissingGuid(_) => "E057",
        }
    }

    pub const fn is_validation_error(&self) -> bool {
        matches!(
            self,
            Self::Config(_) | Self::InvalidAddress(_) | Self::EmptySource
        )
    }
}

/// Failures of the read-only explorer calls.
#[derive(Debug, Error)]
pub enum ApiClientError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    InvalidAddress(#[from] AddressError),

    #[error("[E051] Couldn't reach the explorer: {0}")]
    Network(#[from] TransportError),

    #[error(transparent)]
    Failure(#[from] RequestFailure),

    #[error("[E053] Couldn't read explorer response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("[E054] Explorer returned an error: {0}")]
    Rejected(String),

    #[error("[E055] Couldn't fetch the compiler version list: {0}\n\nSuggestions:\n  • Check that the API key for this network is valid\n  • Not every explorer exposes the solcversions action")]
    CompilerListUnavailable(String),

    #[error("[E056] Couldn't build HTTP client: {0}")]
    Client(reqwest::Error),
}

impl ApiClientError {
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.error_code(),
            Self::InvalidAddress(_) => "E010",
            Self::Network(_) => "E051",
            Self::Failure(f) => f.error_code().as_str(),
            Self::Decode(_) => "E053",
            Self::Rejected(_) => "E054",
            Self::CompilerListUnavailable(_) => "E055",
            Self::Client(_) => "E056",
        }
    }
}
