//! Topic normalization: free-form question text → canonical topic string.

use std::collections::HashSet;

use crate::config::KnowledgeConfig;

/// Derives a canonical topic string from free-form user input.
///
/// Synonym matching takes priority over generic cleanup: if any synonym key
/// appears as a whole word in the raw (lowercased) input, its canonical
/// value is returned immediately. Otherwise the input is lowercased,
/// stripped of punctuation and stopwords, and space-joined. The result may
/// legitimately be empty when the input was pure filler; callers must treat
/// that as "no topic" rather than querying the empty string.
#[derive(Debug, Clone)]
pub struct TopicNormalizer {
    stopwords: HashSet<String>,
    /// (colloquial phrase, canonical topic), longest phrases first so
    /// "edad media" wins over any single-word key it contains.
    synonyms: Vec<(String, String)>,
}

impl TopicNormalizer {
    /// Build a normalizer from the configured stopwords and synonym table.
    pub fn new(config: &KnowledgeConfig) -> Self {
        let stopwords = config
            .stopwords
            .iter()
            .map(|s| s.to_lowercase())
            .collect();

        let mut synonyms: Vec<(String, String)> = config
            .synonyms
            .iter()
            .map(|(k, v)| (k.to_lowercase(), v.clone()))
            .collect();
        synonyms.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

        Self { stopwords, synonyms }
    }

    /// Normalize free-form text into a topic string. Pure transform.
    pub fn normalize(&self, text: &str) -> String {
        let lowered = text.to_lowercase();

        // Synonym match on the raw text, before any cleanup.
        for (phrase, canonical) in &self.synonyms {
            if contains_word(&lowered, phrase) {
                return canonical.clone();
            }
        }

        let cleaned: String = lowered
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { ' ' })
            .collect();

        cleaned
            .split_whitespace()
            .filter(|token| !self.stopwords.contains(*token))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Whether `phrase` occurs in `haystack` bounded by non-alphanumeric
/// characters (or the string edges) on both sides.
fn contains_word(haystack: &str, phrase: &str) -> bool {
    if phrase.is_empty() {
        return false;
    }

    let mut search_from = 0;
    while let Some(rel) = haystack[search_from..].find(phrase) {
        let start = search_from + rel;
        let end = start + phrase.len();

        let before_ok = haystack[..start]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric());
        let after_ok = haystack[end..]
            .chars()
            .next()
            .map_or(true, |c| !c.is_alphanumeric());

        if before_ok && after_ok {
            return true;
        }

        // Advance past this occurrence; `end` is always a char boundary
        // because `phrase` was found there.
        search_from = end;
    }
    false
}
