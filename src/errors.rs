use reqwest::StatusCode;
use std::fmt::{self, Formatter};
use thiserror::Error;
use url::Url;

/// Stable identifier printed in front of user-facing errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorCode(&'static str);

impl ErrorCode {
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        formatter.write_str(self.0)
    }
}

/// Non-2xx answer from an explorer API.
///
/// `url` is the endpoint without its query string, which carries the
/// API key on lookups.
#[derive(Debug, Error)]
pub struct RequestFailure {
    pub url: Url,
    pub status: StatusCode,
    pub msg: String,
}

impl RequestFailure {
    pub fn new(url: Url, status: StatusCode, msg: impl Into<String>) -> Self {
        let mut url = url;
        url.set_query(None);
        Self {
            url,
            status,
            msg: msg.into(),
        }
    }

    pub fn error_code(&self) -> ErrorCode {
        match self.status.as_u16() {
            400..=499 => ErrorCode("E002"),
            _ => ErrorCode("E001"),
        }
    }

    fn suggestions(&self) -> &'static [&'static str] {
        match self.status {
            StatusCode::NOT_FOUND => &[
                "Check that the URL is correct",
                "Verify that the explorer API endpoint is reachable",
            ],
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => &[
                "Check that the API key for this network is valid",
                "Make sure the key belongs to the explorer you are calling",
            ],
            StatusCode::TOO_MANY_REQUESTS => &[
                "Wait a moment before retrying",
                "Consider reducing request frequency",
            ],
            StatusCode::PAYLOAD_TOO_LARGE => &[
                "The flattened source is too large for this explorer",
                "Remove unused imports or comments before flattening",
            ],
            status if status.is_server_error() => &[
                "The explorer is having trouble, try again later",
                "Check the explorer's status page",
            ],
            _ => &["Check the request parameters and try again"],
        }
    }
}

impl fmt::Display for RequestFailure {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        writeln!(
            formatter,
            "[{}] Request to {} failed with status {}",
            self.error_code(),
            self.url,
            self.status
        )?;
        if !self.msg.is_empty() {
            writeln!(formatter, "Server response: {}", self.msg)?;
        }
        writeln!(formatter, "\nSuggestions:")?;
        for suggestion in self.suggestions() {
            writeln!(formatter, "  • {suggestion}")?;
        }
        Ok(())
    }
}
