//! The `KnowledgeSource` trait and answer types.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::FetchError;

/// Where an answer came from.
///
/// The degraded web-search path trades determinism for coverage, so answers
/// carry their origin and responses can distinguish the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerOrigin {
    /// Structured encyclopedia API (search-then-summary).
    Encyclopedia,
    /// Generic web search plus page-content extraction.
    WebSearch,
}

/// A paragraph of answer text fetched from a remote source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    /// Plain answer text.
    pub text: String,
    /// Which path produced it.
    pub origin: AnswerOrigin,
}

impl Answer {
    /// Create an answer from the structured encyclopedia path.
    pub fn encyclopedia(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            origin: AnswerOrigin::Encyclopedia,
        }
    }

    /// Create an answer from the web-search fallback path.
    pub fn web_search(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            origin: AnswerOrigin::WebSearch,
        }
    }
}

/// Trait for remote knowledge fetchers.
///
/// Implementations resolve a normalized topic to a paragraph of text.
/// `Ok(None)` means the source has nothing for this topic; `Err` means the
/// lookup itself failed (timeout, transport, malformed response). Callers
/// treat both as "no answer" at the conversation boundary, but errors stay
/// observable in logs.
#[async_trait]
pub trait KnowledgeSource: Send + Sync {
    /// Fetch an answer for a normalized topic.
    async fn fetch(&self, topic: &str) -> Result<Option<Answer>, FetchError>;

    /// Name of this source, used in logs.
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_constructors() {
        let a = Answer::encyclopedia("texto");
        assert_eq!(a.origin, AnswerOrigin::Encyclopedia);
        assert_eq!(a.text, "texto");

        let a = Answer::web_search("texto");
        assert_eq!(a.origin, AnswerOrigin::WebSearch);
    }

    struct Fixed;

    #[async_trait]
    impl KnowledgeSource for Fixed {
        async fn fetch(&self, _topic: &str) -> Result<Option<Answer>, FetchError> {
            Ok(Some(Answer::encyclopedia("hola")))
        }

        fn name(&self) -> &str {
            "Fixed"
        }
    }

    #[tokio::test]
    async fn test_trait_object() {
        let source: Box<dyn KnowledgeSource> = Box::new(Fixed);
        let answer = source.fetch("tema").await.unwrap().unwrap();
        assert_eq!(answer.text, "hola");
        assert_eq!(source.name(), "Fixed");
    }
}
