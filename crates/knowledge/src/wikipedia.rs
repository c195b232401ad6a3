//! Wikipedia-backed knowledge source (search-then-summary).

use async_trait::async_trait;
use chat_core::{Answer, FetchError, KnowledgeSource};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::KnowledgeConfig;

/// Response body of the REST summary endpoint; only the extract matters.
#[derive(Debug, Deserialize)]
struct SummaryResponse {
    extract: Option<String>,
}

/// Structured encyclopedia lookup in two stages.
///
/// Stage 1 resolves the canonical article title via the opensearch API;
/// stage 2 fetches the article summary. Zero search results, a non-success
/// summary status, or a missing extract all yield `Ok(None)`. Transport
/// failures (DNS, the configured timeout, malformed bodies) surface as
/// [`FetchError`] so they stay observable, but callers are expected to treat
/// them as an absent answer.
pub struct WikipediaSource {
    client: Client,
    config: KnowledgeConfig,
}

impl WikipediaSource {
    /// Create a source with the given configuration.
    pub fn new(config: KnowledgeConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent("Mozilla/5.0 (compatible; AtlasBot/1.0)")
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| FetchError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Stage 1: resolve the canonical article title for a topic.
    ///
    /// Returns `Ok(None)` when the search yields no results.
    async fn resolve_title(&self, topic: &str) -> Result<Option<String>, FetchError> {
        let response = self
            .client
            .get(&self.config.search_api_url)
            .query(&[
                ("action", "opensearch"),
                ("search", topic),
                ("limit", "1"),
                ("format", "json"),
            ])
            .send()
            .await
            .map_err(|e| FetchError::Network(format!("opensearch request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                endpoint: "opensearch".to_string(),
            });
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| FetchError::InvalidResponse(format!("opensearch body: {}", e)))?;

        Ok(parse_opensearch_title(&body))
    }

    /// Stage 2: fetch the summary extract for a resolved title.
    ///
    /// Returns `Ok(None)` on a non-success status or a missing extract.
    async fn fetch_summary(&self, title: &str) -> Result<Option<String>, FetchError> {
        let url = format!(
            "{}/{}",
            self.config.summary_api_url.trim_end_matches('/'),
            encode_title(title)
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Network(format!("summary request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            debug!("Summary for '{}' returned {}", title, status);
            return Ok(None);
        }

        let summary: SummaryResponse = response
            .json()
            .await
            .map_err(|e| FetchError::InvalidResponse(format!("summary body: {}", e)))?;

        Ok(summary.extract.filter(|text| !text.trim().is_empty()))
    }
}

#[async_trait]
impl KnowledgeSource for WikipediaSource {
    async fn fetch(&self, topic: &str) -> Result<Option<Answer>, FetchError> {
        debug!("Wikipedia lookup for topic '{}'", topic);

        let Some(title) = self.resolve_title(topic).await? else {
            debug!("No search results for '{}'", topic);
            return Ok(None);
        };

        debug!("Resolved '{}' → article '{}'", topic, title);

        match self.fetch_summary(&title).await? {
            Some(extract) => Ok(Some(Answer::encyclopedia(extract))),
            None => {
                warn!("Article '{}' has no usable extract", title);
                Ok(None)
            }
        }
    }

    fn name(&self) -> &str {
        "WikipediaSource"
    }
}

/// Pull the top-ranked title out of an opensearch response.
///
/// The body is a positional array: `[query, [titles], [descriptions],
/// [urls]]`.
fn parse_opensearch_title(body: &serde_json::Value) -> Option<String> {
    body.get(1)?
        .as_array()?
        .first()?
        .as_str()
        .map(|s| s.to_string())
}

/// Percent-encode a title for the REST summary path, spaces as underscores.
fn encode_title(title: &str) -> String {
    let underscored = title.replace(' ', "_");
    let mut encoded = String::with_capacity(underscored.len());
    for c in underscored.chars() {
        match c {
            'A'..='Z' | 'a'..='z' | '0'..='9' | '_' | '-' | '.' | '~' => encoded.push(c),
            _ => {
                let mut buf = [0u8; 4];
                for byte in c.encode_utf8(&mut buf).as_bytes() {
                    encoded.push_str(&format!("%{:02X}", byte));
                }
            }
        }
    }
    encoded
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_opensearch_title() {
        let body = json!(["incas", ["Imperio incaico"], [""], ["https://..."]]);
        assert_eq!(
            parse_opensearch_title(&body).as_deref(),
            Some("Imperio incaico")
        );
    }

    #[test]
    fn test_parse_opensearch_no_results() {
        let body = json!(["xyzzy", [], [], []]);
        assert!(parse_opensearch_title(&body).is_none());
    }

    #[test]
    fn test_parse_opensearch_malformed() {
        assert!(parse_opensearch_title(&json!({"unexpected": "shape"})).is_none());
        assert!(parse_opensearch_title(&json!([])).is_none());
    }

    #[test]
    fn test_encode_title() {
        assert_eq!(encode_title("Imperio inca"), "Imperio_inca");
        assert_eq!(encode_title("Napoleón Bonaparte"), "Napole%C3%B3n_Bonaparte");
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_fetch_error() {
        // Connection refused must come back as an error value, never a panic.
        let config = KnowledgeConfig::builder()
            .search_api_url("http://127.0.0.1:9/w/api.php")
            .summary_api_url("http://127.0.0.1:9/summary")
            .request_timeout(std::time::Duration::from_millis(500))
            .build();

        let source = WikipediaSource::new(config).unwrap();
        let result = source.fetch("Imperio inca").await;
        assert!(matches!(result, Err(FetchError::Network(_))));
    }

    // Integration test against the live API.
    #[tokio::test]
    #[ignore]
    async fn test_fetch_live_incas() {
        let source = WikipediaSource::new(KnowledgeConfig::default()).unwrap();
        let answer = source.fetch("Imperio inca").await.unwrap().unwrap();
        assert!(answer.text.len() > 100);
    }
}
