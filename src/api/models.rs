use serde::{Deserialize, Serialize};

use super::transport::Params;
use crate::{address::Address, network::ApiKey, network::NetworkId};

/// Envelope every Etherscan-family endpoint answers with.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    pub result: T,
}

impl<T> ApiResponse<T> {
    pub fn is_ok(&self) -> bool {
        self.status == "1"
    }

    /// The explorer's explanation, ignoring the generic `NOTOK`.
    pub fn reason(&self) -> Option<&str> {
        self.message
            .as_deref()
            .map(str::trim)
            .filter(|message| !message.is_empty() && *message != "NOTOK")
    }
}

/// Everything needed to submit one single-file verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationRequest {
    pub network: NetworkId,
    /// Raw address as given by the caller, validated on submission.
    pub address: String,
    pub source: String,
    pub contract_name: String,
    pub compiler_version: String,
    pub optimization_used: bool,
    pub runs: u32,
    pub evm_version: String,
    /// Hex-encoded constructor arguments, with or without `0x`. May be empty.
    pub constructor_arguments: String,
}

impl VerificationRequest {
    pub const CODE_FORMAT: &'static str = "solidity-single-file";

    pub(crate) fn form(&self, api_key: &ApiKey, address: &Address) -> Params {
        vec![
            ("module", "contract".to_owned()),
            ("action", "verifysourcecode".to_owned()),
            ("apikey", api_key.expose().to_owned()),
            ("contractaddress", address.to_string()),
            ("sourceCode", self.source.clone()),
            ("codeformat", Self::CODE_FORMAT.to_owned()),
            ("contractname", self.contract_name.clone()),
            ("compilerversion", self.compiler_version.clone()),
            (
                "optimizationUsed",
                if self.optimization_used { "1" } else { "0" }.to_owned(),
            ),
            ("runs", self.runs.to_string()),
            // sic: the explorers only understand the misspelled name
            (
                "constructorArguements",
                self.constructor_arguments
                    .strip_prefix("0x")
                    .unwrap_or(&self.constructor_arguments)
                    .to_owned(),
            ),
            ("evmversion", self.evm_version.clone()),
        ]
    }
}

/// A submission the explorer accepted, identified by its `guid`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationJob {
    pub guid: String,
    pub network: NetworkId,
    /// Known when the job was submitted by this process.
    pub address: Option<Address>,
}

impl VerificationJob {
    pub fn new(guid: impl Into<String>, network: NetworkId) -> Self {
        Self {
            guid: guid.into(),
            network,
            address: None,
        }
    }

    #[must_use]
    pub fn with_address(mut self, address: Address) -> Self {
        self.address = Some(address);
        self
    }
}

/// One entry of a `getsourcecode` answer.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct SourceMetadata {
    #[serde(rename = "SourceCode", default)]
    pub source_code: String,
    #[serde(rename = "ContractName", default)]
    pub contract_name: String,
    #[serde(rename = "CompilerVersion", default)]
    pub compiler_version: String,
    #[serde(rename = "OptimizationUsed", default)]
    pub optimization_used: String,
    #[serde(rename = "Runs", default)]
    pub runs: String,
}

impl SourceMetadata {
    pub fn is_verified(&self) -> bool {
        !self.source_code.trim().is_empty()
    }
}
