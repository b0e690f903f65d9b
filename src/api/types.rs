use std::fmt::{self, Display};
use url::Url;

use super::models::ApiResponse;

/// What a single status check said about a job.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum JobStatus {
    Verified,
    Failed(String),
    Pending(String),
    /// Anything else; treated like `Pending` by the poller.
    Unrecognized(String),
}

impl JobStatus {
    const GENERIC_FAILURE: &'static str = "Verification failed";

    /// Classifies a `checkverifystatus` answer by its `result` text.
    pub fn from_response(response: &ApiResponse<String>) -> Self {
        let text = response.result.trim();
        match text {
            "Success" | "Pass - Verified" | "Already Verified" => Self::Verified,
            "Fail" => Self::Failed(
                response
                    .reason()
                    .unwrap_or(Self::GENERIC_FAILURE)
                    .to_owned(),
            ),
            failure if failure.starts_with("Fail - ") => Self::Failed(failure.to_owned()),
            pending if pending.contains("Pending") => Self::Pending(pending.to_owned()),
            other => Self::Unrecognized(other.to_owned()),
        }
    }

    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Verified | Self::Failed(_))
    }
}

impl Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Verified => write!(f, "Verified"),
            Self::Failed(reason) => write!(f, "Failed: {reason}"),
            Self::Pending(text) => write!(f, "Pending ({text})"),
            Self::Unrecognized(text) => write!(f, "Unrecognized status '{text}'"),
        }
    }
}

/// Final word on a verification job. Produced once, never changed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum VerificationOutcome {
    Verified,
    Failed(String),
    /// Still pending when the attempt budget ran out.
    TimedOut {
        attempts: usize,
        explorer_url: Option<Url>,
    },
    /// Stopped by the caller before a terminal status was seen.
    Cancelled { attempts: usize },
}

impl VerificationOutcome {
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Verified)
    }

    /// Short tag stored in the verification history.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Verified => "verified",
            Self::Failed(_) => "failed",
            Self::TimedOut { .. } => "timed-out",
            Self::Cancelled { .. } => "cancelled",
        }
    }
}

impl Display for VerificationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Verified => write!(f, "Contract source code verified"),
            Self::Failed(reason) => write!(f, "Verification failed: {reason}"),
            Self::TimedOut {
                attempts,
                explorer_url,
            } => {
                write!(
                    f,
                    "Verification still pending after {attempts} status checks. "
                )?;
                match explorer_url {
                    Some(url) => write!(
                        f,
                        "Check {url} and verify manually if it does not complete"
                    ),
                    None => write!(
                        f,
                        "Check the explorer and verify manually if it does not complete"
                    ),
                }
            }
            Self::Cancelled { attempts } => {
                write!(f, "Stopped waiting after {attempts} status checks")
            }
        }
    }
}
