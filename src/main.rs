mod args;
mod progress;

use crate::args::{Args, CheckArgs, Commands, StatusArgs, VerifyArgs};
use crate::progress::ApiProgress;

use clap::Parser;
use std::{fs, io, path::PathBuf, process::ExitCode};
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use verifier::{
    abi::{encode_typed_args, EncodeError},
    api::{
        poll_verification_status, ApiClientError, ExplorerClient, SubmitError, VerificationJob,
        VerificationOutcome, VerificationRequest,
    },
    config::{PollPolicy, Timeouts},
    history::{HistoryError, HistoryManager, VerificationRecord},
    network::{ConfigError, NetworkRegistry},
};

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Api(#[from] ApiClientError),

    #[error(transparent)]
    Submit(#[from] SubmitError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    History(#[from] HistoryError),

    #[error("[E060] Couldn't read source file {path:?}: {source}")]
    ReadSource {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Load .env before the logger so RUST_LOG can live there too
    let dotenv = dotenvy::dotenv();
    env_logger::init();
    match dotenv {
        Ok(path) => log::debug!("Loaded environment from {}", path.display()),
        Err(err) if err.not_found() => {}
        Err(err) => log::warn!("Ignoring unreadable .env file: {err}"),
    }

    let Args { command } = Args::parse();
    let registry = NetworkRegistry::from_env()?;

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_interrupt.cancel();
        }
    });

    let outcome = match command {
        Commands::Verify(args) => verify(registry, args, &cancel).await?,
        Commands::Status(args) => Some(status(registry, args, &cancel).await?),
        Commands::Check(args) => {
            check(registry, args).await?;
            None
        }
        Commands::Compilers { network } => {
            let client = ExplorerClient::new(registry, Timeouts::default())?;
            for version in client.compiler_versions(network).await? {
                println!("{version}");
            }
            None
        }
        Commands::Encode { args } => {
            println!("{}", encode_typed_args(&args)?);
            None
        }
        Commands::History { limit } => {
            history(limit)?;
            None
        }
    };

    match outcome {
        Some(outcome) if !outcome.is_success() => {
            eprintln!("{outcome}");
            Ok(ExitCode::FAILURE)
        }
        Some(outcome) => {
            println!("{outcome}");
            Ok(ExitCode::SUCCESS)
        }
        None => Ok(ExitCode::SUCCESS),
    }
}

async fn verify(
    registry: NetworkRegistry,
    args: VerifyArgs,
    cancel: &CancellationToken,
) -> Result<Option<VerificationOutcome>, CliError> {
    let client = ExplorerClient::new(registry, args.timing.timeouts())?;

    let constructor_arguments = match &args.constructor_args {
        Some(hex) => hex.clone(),
        None => encode_typed_args(&args.args)?,
    };
    let source = fs::read_to_string(&args.source).map_err(|source| CliError::ReadSource {
        path: args.source.clone(),
        source,
    })?;

    if !args.force {
        match client.source_code(args.network, args.address.as_str()).await {
            Ok(Some(existing)) => {
                println!(
                    "{} at {} is already verified as {} ({}), use --force to submit anyway",
                    args.network, args.address, existing.contract_name, existing.compiler_version
                );
                return Ok(Some(VerificationOutcome::Verified));
            }
            Ok(None) => {}
            Err(err) => log::warn!("Couldn't check for existing source: {err}"),
        }
    }

    let request = VerificationRequest {
        network: args.network,
        address: args.address.to_string(),
        source,
        contract_name: args.contract_name.clone(),
        compiler_version: args.compiler_version.to_string(),
        optimization_used: args.optimize,
        runs: args.runs,
        evm_version: args.evm_version.clone(),
        constructor_arguments,
    };

    let progress = ApiProgress::new_upload();
    let submitted = client.submit(&request).await;
    progress.finish_and_clear();
    let job = submitted?;

    println!("Submitted {} for verification", args.contract_name);
    println!("verification job id: {}", job.guid);

    let history = open_history();
    if let Some(history) = &history {
        let record = VerificationRecord::new(
            &job,
            args.contract_name.clone(),
            Some(args.source.display().to_string()),
        );
        if let Err(err) = history.add_verification(record) {
            log::warn!("Couldn't record job in history: {err}");
        }
    }

    if args.no_wait {
        println!(
            "Check progress with: evm-verify status --network {} --guid {}",
            job.network, job.guid
        );
        return Ok(None);
    }

    let outcome = wait_for(&client, &job, &args.timing.poll_policy(), cancel).await?;
    if let Some(history) = &history {
        if let Err(err) =
            history.update_verification_status(&job.guid, outcome.label().to_string())
        {
            log::warn!("Couldn't update job history: {err}");
        }
    }

    Ok(Some(outcome))
}

async fn status(
    registry: NetworkRegistry,
    args: StatusArgs,
    cancel: &CancellationToken,
) -> Result<VerificationOutcome, CliError> {
    let client = ExplorerClient::new(registry, args.timing.timeouts())?;

    let mut job = VerificationJob::new(args.guid, args.network);
    if let Some(address) = args.address {
        job = job.with_address(address);
    }

    let outcome = wait_for(&client, &job, &args.timing.poll_policy(), cancel).await?;
    if let Some(history) = open_history() {
        if let Err(err) =
            history.update_verification_status(&job.guid, outcome.label().to_string())
        {
            log::warn!("Couldn't update job history: {err}");
        }
    }

    Ok(outcome)
}

async fn check(registry: NetworkRegistry, args: CheckArgs) -> Result<(), CliError> {
    let client = ExplorerClient::new(registry, Timeouts::default())?;
    match client
        .source_code(args.network, args.address.as_str())
        .await?
    {
        Some(source) => {
            println!("{} is verified", args.address);
            println!("  contract:  {}", source.contract_name);
            println!("  compiler:  {}", source.compiler_version);
            println!(
                "  optimizer: {} ({} runs)",
                if source.optimization_used == "1" {
                    "enabled"
                } else {
                    "disabled"
                },
                source.runs
            );
        }
        None => println!("{} has no verified source on {}", args.address, args.network),
    }
    Ok(())
}

fn history(limit: usize) -> Result<(), CliError> {
    let manager = HistoryManager::new()?;
    let records = manager.list_recent_jobs(limit)?;
    if records.is_empty() {
        println!("No verification jobs recorded in {}", manager.path().display());
    }
    for record in records {
        println!(
            "{}  {:<9} {:<18} {}  {}",
            record.timestamp.format("%Y-%m-%d %H:%M:%S"),
            record.network,
            record.contract_name,
            record.guid,
            record.status.as_deref().unwrap_or("submitted")
        );
    }
    Ok(())
}

async fn wait_for(
    client: &ExplorerClient,
    job: &VerificationJob,
    policy: &PollPolicy,
    cancel: &CancellationToken,
) -> Result<VerificationOutcome, ConfigError> {
    let progress = ApiProgress::new_polling();
    progress.set_message(&format!("Waiting for job {} to finish...", job.guid));
    let outcome = poll_verification_status(client, job, policy, cancel).await;
    progress.finish_and_clear();
    outcome
}

fn open_history() -> Option<HistoryManager> {
    HistoryManager::new()
        .map_err(|err| log::warn!("Verification history unavailable: {err}"))
        .ok()
}
