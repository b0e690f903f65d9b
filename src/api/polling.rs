use backon::{BackoffBuilder, ConstantBuilder};
use tokio_util::sync::CancellationToken;

use super::client::ExplorerClient;
use super::models::VerificationJob;
use super::transport::Transport;
use super::types::{JobStatus, VerificationOutcome};
use crate::{config::PollPolicy, network::ConfigError};

/// Checks `job` until the explorer reports a terminal status, the
/// attempt budget is spent or `cancel` fires.
///
/// Attempts are sequential and separated by `policy.interval`; there is
/// no wait after the last one. A failed status request is logged and
/// counted like a pending answer, so a flaky explorer doesn't abandon a
/// job that may still succeed.
///
/// # Errors
///
/// `UnsupportedNetwork` or `MissingCredential` for the job's network,
/// returned before any request is made.
pub async fn poll_verification_status<T: Transport>(
    client: &ExplorerClient<T>,
    job: &VerificationJob,
    policy: &PollPolicy,
    cancel: &CancellationToken,
) -> Result<VerificationOutcome, ConfigError> {
    client.registry().credential(job.network)?;

    let mut waits = ConstantBuilder::default()
        .with_delay(policy.interval)
        .with_max_times(policy.max_attempts.saturating_sub(1))
        .build();
    let mut attempts = 0;

    while attempts < policy.max_attempts {
        if cancel.is_cancelled() {
            return Ok(VerificationOutcome::Cancelled { attempts });
        }

        attempts += 1;
        match client.check_status(job).await {
            Ok(JobStatus::Verified) => {
                log::info!("Job {} verified after {attempts} checks", job.guid);
                return Ok(VerificationOutcome::Verified);
            }
            Ok(JobStatus::Failed(reason)) => {
                log::info!("Job {} failed: {reason}", job.guid);
                return Ok(VerificationOutcome::Failed(reason));
            }
            Ok(JobStatus::Pending(text)) => {
                log::debug!("Job {} pending ({text}), attempt {attempts}", job.guid);
            }
            Ok(JobStatus::Unrecognized(text)) => {
                log::warn!(
                    "Job {} returned unrecognized status '{text}', attempt {attempts}",
                    job.guid
                );
            }
            Err(err) => {
                log::warn!(
                    "Status check for job {} failed, attempt {attempts}: {err}",
                    job.guid
                );
            }
        }

        let Some(wait) = waits.next() else {
            break;
        };
        log::debug!("Job {} didn't finish, retrying in {wait:?}", job.guid);
        tokio::select! {
            () = cancel.cancelled() => return Ok(VerificationOutcome::Cancelled { attempts }),
            () = tokio::time::sleep(wait) => {}
        }
    }

    log::warn!("Job {} still pending after {attempts} checks", job.guid);
    Ok(VerificationOutcome::TimedOut {
        attempts,
        explorer_url: client.explorer_url(job).ok(),
    })
}
