//! # EVM Contract Verifier
//!
//! Submits Solidity source to Etherscan-family block explorers and
//! follows the verification job until the explorer gives a verdict.
//!
//! ## Features
//!
//! - **Constructor Arguments**: ABI encoding for `uint256`, `address` and `string`
//! - **Multi-network Support**: Ethereum, Polygon, BNB Smart Chain, Arbitrum, Optimism and Base
//! - **Submit and Poll**: bounded request timeouts, a fixed attempt budget and cancellation
//! - **Error Handling**: error types with codes and actionable suggestions
//! - **History**: local record of submitted jobs
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use tokio_util::sync::CancellationToken;
//! use verifier::{
//!     abi::encode_constructor_args,
//!     api::{poll_verification_status, ExplorerClient, VerificationRequest},
//!     config::{PollPolicy, Timeouts},
//!     network::{NetworkId, NetworkRegistry},
//! };
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ExplorerClient::new(NetworkRegistry::from_env()?, Timeouts::default())?;
//!
//! let request = VerificationRequest {
//!     network: NetworkId::Ethereum,
//!     address: "0x5FbDB2315678afecb367f032d93F642f64180aa3".to_string(),
//!     source: std::fs::read_to_string("Token.sol")?,
//!     contract_name: "Token".to_string(),
//!     compiler_version: "v0.8.19+commit.7dd6d404".to_string(),
//!     optimization_used: true,
//!     runs: 200,
//!     evm_version: "paris".to_string(),
//!     constructor_arguments: encode_constructor_args(&["uint256"], &["1000000"])?,
//! };
//!
//! let job = client.submit(&request).await?;
//! let outcome =
//!     poll_verification_status(&client, &job, &PollPolicy::default(), &CancellationToken::new())
//!         .await?;
//! println!("{outcome}");
//! # Ok(())
//! # }
//! ```

/// Constructor-argument encoding
pub mod abi;

/// Address validation and normalisation
pub mod address;

/// Explorer client, submission and status polling
pub mod api;

/// Compiler version validation
pub mod compiler_version;

/// Timeouts and polling policy
pub mod config;

/// Shared error types
pub mod errors;

/// Local record of submitted verification jobs
pub mod history;

/// Supported networks and their explorer credentials
pub mod network;
