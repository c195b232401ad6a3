//! Core trait and types for the Atlas assistant.
//!
//! This crate provides the shared interface between the orchestrator and the
//! knowledge pipeline. It defines:
//!
//! - [`KnowledgeSource`] - The trait remote knowledge fetchers implement
//! - [`InboundMessage`] / [`OutboundMessage`] - Message types for one turn
//! - [`Answer`] / [`AnswerOrigin`] - A fetched answer and where it came from
//! - [`FetchError`] - Error type for fetch operations
//!
//! # Example
//!
//! ```rust
//! use chat_core::{Answer, FetchError, KnowledgeSource};
//! use async_trait::async_trait;
//!
//! struct MySource;
//!
//! #[async_trait]
//! impl KnowledgeSource for MySource {
//!     async fn fetch(&self, topic: &str) -> Result<Option<Answer>, FetchError> {
//!         Ok(Some(Answer::encyclopedia(format!("Todo sobre {}", topic))))
//!     }
//!
//!     fn name(&self) -> &str {
//!         "MySource"
//!     }
//! }
//! ```

mod error;
mod message;
mod source;

pub use error::FetchError;
pub use message::{InboundMessage, OutboundMessage};
pub use source::{Answer, AnswerOrigin, KnowledgeSource};

// Re-export async_trait for convenience
pub use async_trait::async_trait;
