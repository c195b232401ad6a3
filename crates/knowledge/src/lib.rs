//! Topic normalization, caching, and remote knowledge fetching.
//!
//! This crate implements the knowledge pipeline the orchestrator drives for
//! knowledge queries:
//!
//! normalizer → cache lookup → [hit: return] / [miss: fetch → write-through
//! → format] / [failure: apology]
//!
//! The pieces are independently swappable: [`TopicNormalizer`] is a pure
//! transform, [`KnowledgeCache`] wraps a persisted JSON document, the
//! fetchers implement [`chat_core::KnowledgeSource`], and
//! [`ResponseFormatter`] is a pure presentation layer. Truncation length,
//! stopword set, and synonym table all come from [`KnowledgeConfig`].

mod cache;
mod combined;
mod config;
mod formatter;
mod normalizer;
mod web_search;
mod wikipedia;

pub use cache::KnowledgeCache;
pub use combined::CombinedSource;
pub use config::{KnowledgeConfig, KnowledgeConfigBuilder};
pub use formatter::{QuestionKind, ResponseFormatter};
pub use normalizer::TopicNormalizer;
pub use web_search::WebSearchSource;
pub use wikipedia::WikipediaSource;
