//! Connector errors — direct propagation of the failing layer.
//!
//! The taxonomy is deliberately flat: local IO failures surface as
//! [`Error::Io`], transport and decode failures as [`Error::Http`], and
//! non-2xx provider responses as [`Error::Api`] with the body carried
//! verbatim. The connector never retries, classifies, or translates
//! provider faults.

use std::time::Duration;

/// Result alias used throughout the connector.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Local file missing, unreadable, or unwritable.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Transport failure or response decode failure.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-success status. The body is kept
    /// as-is for the caller; only log lines truncate it.
    #[error("api error ({status}): {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },

    /// A 2xx response that lacked the field the operation returns
    /// (e.g. an empty `choices` array).
    #[error("malformed provider response: {0}")]
    MalformedResponse(&'static str),

    /// `wait_for_run` gave up before the run reached a terminal status.
    #[error("run {run_id} not terminal after {waited:?}")]
    RunTimeout { run_id: String, waited: Duration },
}

impl Error {
    /// HTTP status of an API error, if this is one.
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            Error::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
