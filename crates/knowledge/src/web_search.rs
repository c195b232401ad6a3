//! Degraded web-search fallback source.

use async_trait::async_trait;
use chat_core::{Answer, FetchError, KnowledgeSource};
use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

use crate::config::KnowledgeConfig;

/// How many result pages to try before giving up.
const MAX_RESULT_PAGES: usize = 3;

/// Maximum page body size fed to the extractor (500KB).
const MAX_BODY_BYTES: usize = 500 * 1024;

/// Best-effort secondary source: generic web search plus page extraction.
///
/// Queries an HTML search endpoint, follows the top result links, strips
/// boilerplate with `html2text`, and accepts the first extraction longer
/// than the configured minimum. This trades determinism for coverage, so
/// answers are tagged [`chat_core::AnswerOrigin::WebSearch`] and the
/// combined source only consults it after the structured path came up empty.
pub struct WebSearchSource {
    client: Client,
    config: KnowledgeConfig,
}

impl WebSearchSource {
    /// Create a source with the given configuration.
    pub fn new(config: KnowledgeConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent("Mozilla/5.0 (compatible; AtlasBot/1.0)")
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| FetchError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Run the search query and collect candidate result links.
    async fn search_links(&self, topic: &str) -> Result<Vec<String>, FetchError> {
        let response = self
            .client
            .get(&self.config.web_search_url)
            .query(&[("q", topic)])
            .send()
            .await
            .map_err(|e| FetchError::Network(format!("web search failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                endpoint: "web_search".to_string(),
            });
        }

        let html = response
            .text()
            .await
            .map_err(|e| FetchError::InvalidResponse(format!("search body: {}", e)))?;

        Ok(extract_links(&html, MAX_RESULT_PAGES))
    }

    /// Fetch one result page and extract its readable text.
    ///
    /// Any failure on an individual page is logged and swallowed; the next
    /// candidate gets its chance.
    async fn extract_page(&self, link: &str) -> Option<String> {
        let response = match self.client.get(link).send().await {
            Ok(response) if response.status().is_success() => response,
            Ok(response) => {
                debug!("Result page {} returned {}", link, response.status());
                return None;
            }
            Err(e) => {
                debug!("Result page {} failed: {}", link, e);
                return None;
            }
        };

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                debug!("Result page {} body failed: {}", link, e);
                return None;
            }
        };

        let body = crate::formatter::truncate_utf8(&body, MAX_BODY_BYTES);
        let text = match html2text::from_read(body.as_bytes(), 80) {
            Ok(text) => text,
            Err(e) => {
                debug!("Extraction failed for {}: {}", link, e);
                return None;
            }
        };

        Some(collapse_whitespace(&text))
    }
}

#[async_trait]
impl KnowledgeSource for WebSearchSource {
    async fn fetch(&self, topic: &str) -> Result<Option<Answer>, FetchError> {
        debug!("Web search fallback for topic '{}'", topic);

        let links = self.search_links(topic).await?;
        if links.is_empty() {
            debug!("Web search yielded no result links for '{}'", topic);
            return Ok(None);
        }

        for link in &links {
            if let Some(text) = self.extract_page(link).await {
                if text.chars().count() >= self.config.min_extract_chars {
                    debug!("Accepted extraction from {} ({} chars)", link, text.len());
                    return Ok(Some(Answer::web_search(text)));
                }
                debug!("Extraction from {} too short, trying next result", link);
            }
        }

        warn!("No result page produced a usable extraction for '{}'", topic);
        Ok(None)
    }

    fn name(&self) -> &str {
        "WebSearchSource"
    }
}

/// Pull absolute result links out of a search result page.
///
/// Handles the redirect-style links some engines emit (target URL carried
/// in a `uddg` query parameter) and skips engine-internal links.
fn extract_links(html: &str, max: usize) -> Vec<String> {
    let mut links = Vec::new();

    for chunk in html.split("href=\"").skip(1) {
        let Some(end) = chunk.find('"') else { continue };
        let href = chunk[..end].replace("&amp;", "&");

        if let Some(link) = resolve_result_link(&href) {
            if !links.contains(&link) {
                links.push(link);
            }
        }
        if links.len() >= max {
            break;
        }
    }

    links
}

/// Resolve one href into a fetchable external URL, or discard it.
fn resolve_result_link(href: &str) -> Option<String> {
    let absolute = if let Some(rest) = href.strip_prefix("//") {
        format!("https://{}", rest)
    } else {
        href.to_string()
    };

    let parsed = Url::parse(&absolute).ok()?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return None;
    }

    let host = parsed.host_str()?;
    if host.ends_with("duckduckgo.com") {
        // Redirect link: the real target is in the uddg parameter.
        let target = parsed
            .query_pairs()
            .find(|(key, _)| key == "uddg")
            .map(|(_, value)| value.into_owned())?;
        let target_url = Url::parse(&target).ok()?;
        matches!(target_url.scheme(), "http" | "https").then_some(target)
    } else {
        Some(absolute)
    }
}

/// Collapse runs of blank lines and trailing whitespace from extracted text.
fn collapse_whitespace(text: &str) -> String {
    let mut lines: Vec<&str> = Vec::new();
    let mut last_blank = false;

    for line in text.lines() {
        let trimmed = line.trim_end();
        let blank = trimmed.trim().is_empty();
        if blank && last_blank {
            continue;
        }
        lines.push(trimmed);
        last_blank = blank;
    }

    lines.join("\n").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_links_direct() {
        let html = r#"<a href="https://es.example.org/inca">Inca</a>
                      <a href="https://museo.example.com/historia">Museo</a>"#;
        let links = extract_links(html, 3);
        assert_eq!(
            links,
            vec![
                "https://es.example.org/inca".to_string(),
                "https://museo.example.com/historia".to_string(),
            ]
        );
    }

    #[test]
    fn test_extract_links_redirect_style() {
        let html = r#"<a class="result"
            href="//duckduckgo.com/l/?uddg=https%3A%2F%2Fes.example.org%2Finca&amp;rut=abc">x</a>"#;
        let links = extract_links(html, 3);
        assert_eq!(links, vec!["https://es.example.org/inca".to_string()]);
    }

    #[test]
    fn test_extract_links_skips_non_http_and_dedupes() {
        let html = r#"<a href="javascript:void(0)">x</a>
                      <a href="mailto:a@b.c">y</a>
                      <a href="https://es.example.org/inca">1</a>
                      <a href="https://es.example.org/inca">2</a>"#;
        let links = extract_links(html, 5);
        assert_eq!(links.len(), 1);
    }

    #[test]
    fn test_extract_links_respects_max() {
        let html: String = (0..10)
            .map(|i| format!(r#"<a href="https://example.org/{}">x</a>"#, i))
            .collect();
        assert_eq!(extract_links(&html, 3).len(), 3);
    }

    #[test]
    fn test_collapse_whitespace() {
        let text = "Primera línea.   \n\n\n\nSegunda línea.\n\n";
        assert_eq!(collapse_whitespace(text), "Primera línea.\n\nSegunda línea.");
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_fetch_error() {
        let config = KnowledgeConfig::builder()
            .web_search_url("http://127.0.0.1:9/html/")
            .request_timeout(std::time::Duration::from_millis(500))
            .build();

        let source = WebSearchSource::new(config).unwrap();
        let result = source.fetch("imperio inca").await;
        assert!(matches!(result, Err(FetchError::Network(_))));
    }

    // Integration test against the live search endpoint.
    #[tokio::test]
    #[ignore]
    async fn test_fetch_live() {
        let config = KnowledgeConfig::builder().enable_web_fallback(true).build();
        let source = WebSearchSource::new(config).unwrap();
        let result = source.fetch("imperio inca").await.unwrap();
        assert!(result.is_some());
    }
}
