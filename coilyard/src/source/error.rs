//! Errors raised while checking the arrival feed.
//!
//! None of these leave [`RemoteCoilSource::poll`](super::RemoteCoilSource::poll);
//! they are reported to the logger and the poll yields nothing.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// The host reports no connectivity; no request was sent.
    #[error("Offline: cannot check for new coils")]
    Offline,

    /// Transport failure (connect, timeout, body read).
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// The endpoint answered with a non-success status.
    #[error("API error: HTTP {0}")]
    Status(u16),

    /// The body was not valid JSON for the expected shape.
    #[error("Failed to parse response: {0}")]
    Json(String),

    /// Valid JSON, but the fields don't describe a usable arrival.
    #[error("Malformed arrival notice: {0}")]
    Malformed(String),
}
