//! Configuration for the knowledge pipeline.

use std::env;
use std::time::Duration;

/// Default per-request timeout for remote lookups.
const DEFAULT_TIMEOUT_SECS: u64 = 8;

/// Default maximum display length for formatted answers.
const DEFAULT_MAX_DISPLAY_CHARS: usize = 1500;

/// Default minimum length for an accepted web-search extraction.
const DEFAULT_MIN_EXTRACT_CHARS: usize = 400;

/// Filler tokens removed by the normalizer. Articles, prepositions, and
/// conversational verbs ("cuéntame", "sabes") that never carry the topic.
const DEFAULT_STOPWORDS: &[&str] = &[
    "sabes", "sobre", "historia", "de", "del", "los", "las", "el", "la", "lo",
    "que", "qué", "quien", "quién", "cuentame", "cuéntame", "hablame",
    "háblame", "dime", "acerca", "puedes", "explicarme", "en", "un", "una",
    "por", "favor", "me", "y",
];

/// Colloquial phrase → canonical topic table.
const DEFAULT_SYNONYMS: &[(&str, &str)] = &[
    ("incas", "Imperio inca"),
    ("inca", "Imperio inca"),
    ("mayas", "Civilización maya"),
    ("maya", "Civilización maya"),
    ("romano", "Imperio romano"),
    ("roma", "Imperio romano"),
    ("egipto", "Antiguo Egipto"),
    ("egipcio", "Antiguo Egipto"),
    ("egipcia", "Antiguo Egipto"),
    ("grecia", "Antigua Grecia"),
    ("griego", "Antigua Grecia"),
    ("edad media", "Edad Media"),
    ("medieval", "Edad Media"),
    ("napoleón", "Napoleón Bonaparte"),
    ("napoleon", "Napoleón Bonaparte"),
];

/// Configuration for the knowledge pipeline.
#[derive(Debug, Clone)]
pub struct KnowledgeConfig {
    /// Wikipedia opensearch endpoint for title resolution.
    pub search_api_url: String,

    /// Wikipedia REST summary endpoint base (title is appended).
    pub summary_api_url: String,

    /// HTML search endpoint for the web fallback path.
    pub web_search_url: String,

    /// Bounded timeout applied to each network call.
    pub request_timeout: Duration,

    /// Maximum display length before the formatter truncates.
    pub max_display_chars: usize,

    /// Enable the degraded web-search fallback path.
    pub enable_web_fallback: bool,

    /// Minimum length for an extracted page body to count as an answer.
    pub min_extract_chars: usize,

    /// Stopword set for the normalizer.
    pub stopwords: Vec<String>,

    /// Colloquial phrase → canonical topic table for the normalizer.
    pub synonyms: Vec<(String, String)>,
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self {
            search_api_url: "https://es.wikipedia.org/w/api.php".to_string(),
            summary_api_url: "https://es.wikipedia.org/api/rest_v1/page/summary".to_string(),
            web_search_url: "https://html.duckduckgo.com/html/".to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_display_chars: DEFAULT_MAX_DISPLAY_CHARS,
            enable_web_fallback: false,
            min_extract_chars: DEFAULT_MIN_EXTRACT_CHARS,
            stopwords: DEFAULT_STOPWORDS.iter().map(|s| s.to_string()).collect(),
            synonyms: DEFAULT_SYNONYMS
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl KnowledgeConfig {
    /// Create configuration from environment variables.
    ///
    /// All variables are optional; unset values fall back to the defaults:
    /// - `ATLAS_WIKI_SEARCH_URL` - opensearch endpoint
    /// - `ATLAS_WIKI_SUMMARY_URL` - REST summary endpoint base
    /// - `ATLAS_WEB_SEARCH_URL` - HTML search endpoint for the fallback
    /// - `ATLAS_REQUEST_TIMEOUT_SECS` - per-request timeout (default: 8)
    /// - `ATLAS_MAX_DISPLAY_CHARS` - truncation length (default: 1500)
    /// - `ATLAS_WEB_FALLBACK` - enable the web fallback (default: false)
    /// - `ATLAS_MIN_EXTRACT_CHARS` - minimum extraction length (default: 400)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = env::var("ATLAS_WIKI_SEARCH_URL") {
            config.search_api_url = url;
        }
        if let Ok(url) = env::var("ATLAS_WIKI_SUMMARY_URL") {
            config.summary_api_url = url;
        }
        if let Ok(url) = env::var("ATLAS_WEB_SEARCH_URL") {
            config.web_search_url = url;
        }
        if let Some(secs) = env::var("ATLAS_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            config.request_timeout = Duration::from_secs(secs);
        }
        if let Some(chars) = env::var("ATLAS_MAX_DISPLAY_CHARS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            config.max_display_chars = chars;
        }
        if let Ok(value) = env::var("ATLAS_WEB_FALLBACK") {
            config.enable_web_fallback = value.to_lowercase() == "true" || value == "1";
        }
        if let Some(chars) = env::var("ATLAS_MIN_EXTRACT_CHARS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            config.min_extract_chars = chars;
        }

        config
    }

    /// Create a new config builder.
    pub fn builder() -> KnowledgeConfigBuilder {
        KnowledgeConfigBuilder::default()
    }
}

/// Builder for [`KnowledgeConfig`].
#[derive(Debug, Default)]
pub struct KnowledgeConfigBuilder {
    config: KnowledgeConfig,
}

impl KnowledgeConfigBuilder {
    /// Set the opensearch endpoint.
    pub fn search_api_url(mut self, url: impl Into<String>) -> Self {
        self.config.search_api_url = url.into();
        self
    }

    /// Set the REST summary endpoint base.
    pub fn summary_api_url(mut self, url: impl Into<String>) -> Self {
        self.config.summary_api_url = url.into();
        self
    }

    /// Set the HTML search endpoint for the fallback path.
    pub fn web_search_url(mut self, url: impl Into<String>) -> Self {
        self.config.web_search_url = url.into();
        self
    }

    /// Set the per-request timeout.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout = timeout;
        self
    }

    /// Set the truncation length.
    pub fn max_display_chars(mut self, chars: usize) -> Self {
        self.config.max_display_chars = chars;
        self
    }

    /// Enable or disable the web fallback path.
    pub fn enable_web_fallback(mut self, enable: bool) -> Self {
        self.config.enable_web_fallback = enable;
        self
    }

    /// Set the minimum extraction length.
    pub fn min_extract_chars(mut self, chars: usize) -> Self {
        self.config.min_extract_chars = chars;
        self
    }

    /// Replace the stopword set.
    pub fn stopwords(mut self, stopwords: Vec<String>) -> Self {
        self.config.stopwords = stopwords;
        self
    }

    /// Replace the synonym table.
    pub fn synonyms(mut self, synonyms: Vec<(String, String)>) -> Self {
        self.config.synonyms = synonyms;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> KnowledgeConfig {
        self.config
    }
}
