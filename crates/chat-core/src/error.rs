//! Error types for knowledge fetch operations.

use thiserror::Error;

/// Errors that can occur while fetching knowledge from a remote source.
///
/// These are surfaced at the I/O boundary so failure causes show up in logs
/// and tests. The orchestrator converts any of them into an absent answer;
/// a fetch failure never terminates a conversational turn.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level failure (DNS, timeout, connection reset).
    #[error("network error: {0}")]
    Network(String),

    /// The remote endpoint returned a non-success status.
    #[error("unexpected status {status} from {endpoint}")]
    Status { status: u16, endpoint: String },

    /// The response body could not be parsed as expected.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// The source was misconfigured (bad URL, unbuildable client).
    #[error("configuration error: {0}")]
    Configuration(String),
}
