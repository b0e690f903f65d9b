use std::time::Duration;

/// Per-request deadlines for explorer calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    /// Source submission.
    pub submit: Duration,
    /// Status checks and read-only lookups.
    pub status: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            submit: Duration::from_secs(30),
            status: Duration::from_secs(10),
        }
    }
}

/// How long to keep asking about a submitted job.
///
/// The loop has no wall-clock cap beyond `max_attempts * interval`
/// plus the time spent in the requests themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub max_attempts: usize,
    pub interval: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 12,
            interval: Duration::from_secs(5),
        }
    }
}
