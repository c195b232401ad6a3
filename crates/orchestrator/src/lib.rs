//! Conversation orchestration: intent routing, arithmetic, profile and
//! session state, and the knowledge-query pipeline.
//!
//! The [`Assistant`] is the single entry point: it classifies each inbound
//! message, dispatches to the appropriate handler, and always produces a
//! reply.

mod arithmetic;
mod error;
mod intent;
mod orchestrator;
mod profile;
mod session;

pub use arithmetic::solve_arithmetic;
pub use error::OrchestratorError;
pub use intent::Intent;
pub use orchestrator::{Assistant, AssistantConfig};
pub use profile::ProfileStore;
pub use session::SessionStore;
