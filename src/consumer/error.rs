//! Failure taxonomy for one fetch.

use std::error::Error as StdError;
use std::fmt;

use axum::http::StatusCode;
use thiserror::Error;

/// Coarse classification used for logging and metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The exchange with the producer failed (connect, DNS, timeout, status).
    Transport,
    /// The producer answered, but the body was not a valid number payload.
    Payload,
    /// The fetch itself panicked or was cancelled.
    Unexpected,
}

impl FailureKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FailureKind::Transport => "transport",
            FailureKind::Payload => "payload",
            FailureKind::Unexpected => "unexpected",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors from fetching a number from the producer.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("{}", error_chain(.0))]
    Transport(#[from] reqwest::Error),

    #[error("producer responded with status {0}")]
    Status(StatusCode),

    #[error("invalid payload: {0}")]
    Payload(String),

    #[error("unexpected failure: {0}")]
    Unexpected(String),
}

impl FetchError {
    pub fn kind(&self) -> FailureKind {
        match self {
            FetchError::Transport(_) | FetchError::Status(_) => FailureKind::Transport,
            FetchError::Payload(_) => FailureKind::Payload,
            FetchError::Unexpected(_) => FailureKind::Unexpected,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, FetchError::Transport(e) if e.is_timeout())
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Payload(e.to_string())
    }
}

/// reqwest's top-level message omits the cause ("error sending request"),
/// so append each source in turn.
fn error_chain(error: &(dyn StdError + 'static)) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}
