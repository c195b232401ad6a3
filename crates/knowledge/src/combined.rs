//! Structured-first source with optional web-search fallback.

use std::sync::Arc;

use async_trait::async_trait;
use chat_core::{Answer, FetchError, KnowledgeSource};
use tracing::{debug, warn};

/// Consults the structured source first; the fallback (when configured)
/// only runs after the structured path yielded nothing or failed.
pub struct CombinedSource {
    primary: Arc<dyn KnowledgeSource>,
    fallback: Option<Arc<dyn KnowledgeSource>>,
}

impl CombinedSource {
    /// Create a combined source.
    pub fn new(
        primary: Arc<dyn KnowledgeSource>,
        fallback: Option<Arc<dyn KnowledgeSource>>,
    ) -> Self {
        Self { primary, fallback }
    }
}

#[async_trait]
impl KnowledgeSource for CombinedSource {
    async fn fetch(&self, topic: &str) -> Result<Option<Answer>, FetchError> {
        match self.primary.fetch(topic).await {
            Ok(Some(answer)) => return Ok(Some(answer)),
            Ok(None) => {
                debug!("{} had nothing for '{}'", self.primary.name(), topic);
            }
            Err(e) => {
                warn!("{} failed for '{}': {}", self.primary.name(), topic, e);
                // Without a fallback, the failure is the caller's to handle.
                if self.fallback.is_none() {
                    return Err(e);
                }
            }
        }

        match &self.fallback {
            Some(fallback) => fallback.fetch(topic).await,
            None => Ok(None),
        }
    }

    fn name(&self) -> &str {
        "CombinedSource"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Option<Answer>);

    #[async_trait]
    impl KnowledgeSource for Fixed {
        async fn fetch(&self, _topic: &str) -> Result<Option<Answer>, FetchError> {
            Ok(self.0.clone())
        }

        fn name(&self) -> &str {
            "Fixed"
        }
    }

    struct Failing;

    #[async_trait]
    impl KnowledgeSource for Failing {
        async fn fetch(&self, _topic: &str) -> Result<Option<Answer>, FetchError> {
            Err(FetchError::Network("simulated timeout".to_string()))
        }

        fn name(&self) -> &str {
            "Failing"
        }
    }

    #[tokio::test]
    async fn test_primary_hit_skips_fallback() {
        let source = CombinedSource::new(
            Arc::new(Fixed(Some(Answer::encyclopedia("estructurada")))),
            Some(Arc::new(Fixed(Some(Answer::web_search("web"))))),
        );

        let answer = source.fetch("tema").await.unwrap().unwrap();
        assert_eq!(answer.text, "estructurada");
    }

    #[tokio::test]
    async fn test_primary_miss_uses_fallback() {
        let source = CombinedSource::new(
            Arc::new(Fixed(None)),
            Some(Arc::new(Fixed(Some(Answer::web_search("web"))))),
        );

        let answer = source.fetch("tema").await.unwrap().unwrap();
        assert_eq!(answer.text, "web");
        assert_eq!(answer.origin, chat_core::AnswerOrigin::WebSearch);
    }

    #[tokio::test]
    async fn test_primary_failure_uses_fallback() {
        let source = CombinedSource::new(
            Arc::new(Failing),
            Some(Arc::new(Fixed(Some(Answer::web_search("web"))))),
        );

        let answer = source.fetch("tema").await.unwrap().unwrap();
        assert_eq!(answer.text, "web");
    }

    #[tokio::test]
    async fn test_primary_failure_without_fallback_propagates() {
        let source = CombinedSource::new(Arc::new(Failing), None);
        assert!(matches!(
            source.fetch("tema").await,
            Err(FetchError::Network(_))
        ));
    }

    #[tokio::test]
    async fn test_both_empty_is_none() {
        let source = CombinedSource::new(Arc::new(Fixed(None)), Some(Arc::new(Fixed(None))));
        assert!(source.fetch("tema").await.unwrap().is_none());
    }
}
