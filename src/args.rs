use std::{path::PathBuf, time::Duration};

use verifier::{
    address::Address,
    compiler_version::CompilerVersion,
    config::{PollPolicy, Timeouts},
    network::NetworkId,
};

fn contract_name_value_parser(name: &str) -> Result<String, String> {
    if name.is_empty() {
        return Err("Contract name cannot be empty".to_string());
    }

    if name.len() > 100 {
        return Err("Contract name cannot exceed 100 characters".to_string());
    }

    // Solidity identifiers, optionally qualified as `path/File.sol:Name`
    let (_, identifier) = name.rsplit_once(':').unwrap_or(("", name));
    let mut chars = identifier.chars();
    let starts_ok = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$');
    if !starts_ok || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$') {
        return Err(format!("'{identifier}' is not a valid Solidity contract name"));
    }

    Ok(name.to_string())
}

fn seconds_value_parser(raw: &str) -> Result<Duration, String> {
    raw.parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|_| format!("'{raw}' is not a whole number of seconds"))
}

#[derive(clap::Parser)]
#[command(name = "evm-verify")]
#[command(version)]
#[command(about = "Verify Solidity contracts on Etherscan-family block explorers")]
#[command(long_about = "
A command-line tool for verifying Solidity smart contracts on Etherscan-family
block explorers.

API keys are read from the environment (or a .env file) per network:
ETHERSCAN_API_KEY, POLYGONSCAN_API_KEY, BSCSCAN_API_KEY, ARBISCAN_API_KEY,
OPTIMISTIC_ETHERSCAN_API_KEY and BASESCAN_API_KEY. The matching *_API_URL
variables override the API endpoint.

Examples:
  # Verify a flattened contract with one constructor argument
  evm-verify verify --network ethereum \\
    --address 0x5FbDB2315678afecb367f032d93F642f64180aa3 \\
    --source flat/Token.sol --contract-name Token \\
    --compiler-version v0.8.19+commit.7dd6d404 --optimize --runs 200 \\
    --arg uint256=1000000

  # Check on a job submitted earlier
  evm-verify status --network ethereum --guid <GUID>
")]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand)]
#[allow(clippy::large_enum_variant)]
pub enum Commands {
    /// Submit contract source for verification and wait for the result
    Verify(VerifyArgs),

    /// Follow a previously submitted verification job
    Status(StatusArgs),

    /// Show whether the explorer already has verified source for a contract
    Check(CheckArgs),

    /// List compiler versions the explorer accepts
    Compilers {
        #[arg(long, value_enum)]
        network: NetworkId,
    },

    /// Print ABI-encoded constructor arguments
    Encode {
        /// Constructor argument as TYPE=VALUE (uint256, address or string)
        #[arg(long = "arg", value_name = "TYPE=VALUE")]
        args: Vec<String>,
    },

    /// Show recently submitted verification jobs
    History {
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
}

#[derive(clap::Args)]
pub struct VerifyArgs {
    /// Network the contract is deployed on
    #[arg(long, value_enum)]
    pub network: NetworkId,

    /// Address of the deployed contract
    #[arg(long, value_name = "ADDRESS", value_parser = Address::new)]
    pub address: Address,

    /// Flattened Solidity source file
    #[arg(long, value_name = "FILE", value_hint = clap::ValueHint::FilePath)]
    pub source: PathBuf,

    /// Name of the contract to verify
    #[arg(
        long = "contract-name",
        value_name = "NAME",
        value_parser = contract_name_value_parser
    )]
    pub contract_name: String,

    /// Full compiler version, e.g. v0.8.19+commit.7dd6d404
    #[arg(long, value_name = "VERSION", value_parser = CompilerVersion::new)]
    pub compiler_version: CompilerVersion,

    /// Contract was compiled with the optimizer enabled
    #[arg(long, default_value_t = false)]
    pub optimize: bool,

    /// Optimizer runs used at compile time
    #[arg(long, default_value_t = 200, value_parser = clap::value_parser!(u32).range(1..))]
    pub runs: u32,

    /// EVM version the contract was compiled for; empty uses the compiler default
    #[arg(long, value_name = "VERSION", default_value = "")]
    pub evm_version: String,

    /// Constructor argument as TYPE=VALUE, repeated in declaration order
    #[arg(long = "arg", value_name = "TYPE=VALUE", conflicts_with = "constructor_args")]
    pub args: Vec<String>,

    /// Already ABI-encoded constructor arguments
    #[arg(long, value_name = "HEX")]
    pub constructor_args: Option<String>,

    /// Submit even if the explorer already shows verified source
    #[arg(long, default_value_t = false)]
    pub force: bool,

    /// Print the job id and exit without waiting for the result
    #[arg(long, default_value_t = false)]
    pub no_wait: bool,

    #[command(flatten)]
    pub timing: TimingArgs,
}

#[derive(clap::Args)]
pub struct StatusArgs {
    #[arg(long, value_enum)]
    pub network: NetworkId,

    /// Job id returned on submission
    #[arg(long, value_name = "GUID")]
    pub guid: String,

    /// Contract address, used to link the explorer page
    #[arg(long, value_name = "ADDRESS", value_parser = Address::new)]
    pub address: Option<Address>,

    #[command(flatten)]
    pub timing: TimingArgs,
}

#[derive(clap::Args)]
pub struct CheckArgs {
    #[arg(long, value_enum)]
    pub network: NetworkId,

    #[arg(long, value_name = "ADDRESS", value_parser = Address::new)]
    pub address: Address,
}

#[derive(clap::Args)]
pub struct TimingArgs {
    /// Status checks before giving up
    #[arg(long, env = "VERIFY_MAX_ATTEMPTS", default_value_t = 12)]
    pub max_attempts: usize,

    /// Seconds between status checks
    #[arg(
        long,
        env = "VERIFY_POLL_INTERVAL",
        value_name = "SECS",
        default_value = "5",
        value_parser = seconds_value_parser
    )]
    pub interval: Duration,

    /// Submission request timeout in seconds
    #[arg(
        long,
        env = "VERIFY_SUBMIT_TIMEOUT",
        value_name = "SECS",
        default_value = "30",
        value_parser = seconds_value_parser
    )]
    pub submit_timeout: Duration,

    /// Status request timeout in seconds
    #[arg(
        long,
        env = "VERIFY_STATUS_TIMEOUT",
        value_name = "SECS",
        default_value = "10",
        value_parser = seconds_value_parser
    )]
    pub status_timeout: Duration,
}

impl TimingArgs {
    pub const fn poll_policy(&self) -> PollPolicy {
        PollPolicy {
            max_attempts: self.max_attempts,
            interval: self.interval,
        }
    }

    pub const fn timeouts(&self) -> Timeouts {
        Timeouts {
            submit: self.submit_timeout,
            status: self.status_timeout,
        }
    }
}
