//! Orchestrator error types.

use thiserror::Error;

/// Errors surfaced while assembling a reply.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// A knowledge lookup failed at the transport level.
    #[error("knowledge lookup failed: {0}")]
    Lookup(#[from] chat_core::FetchError),
}
