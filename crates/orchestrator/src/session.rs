//! Per-session conversation state with LRU eviction.
//!
//! Each session carries a single slot: the last topic the assistant
//! actually resolved, used to answer follow-ups like "cuéntame más".

use indexmap::IndexMap;
use tokio::sync::RwLock;

/// Maximum number of sessions tracked before LRU eviction.
const DEFAULT_MAX_SESSIONS: usize = 10000;

/// Follow-up phrases that refer back to the previous topic.
const CONTINUATION_PHRASES: &[&str] = &["cuéntame más", "cuentame mas", "sigue", "más", "mas"];

/// Tracks the last resolved topic per session.
///
/// Uses insertion order for LRU: touching a session moves it to the end,
/// and the oldest sessions are evicted once the limit is exceeded.
#[derive(Debug)]
pub struct SessionStore {
    topics: RwLock<IndexMap<String, String>>,
    max_sessions: usize,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_limit(DEFAULT_MAX_SESSIONS)
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(max_sessions: usize) -> Self {
        Self {
            topics: RwLock::new(IndexMap::new()),
            max_sessions,
        }
    }

    /// Last topic resolved in this session, marking it recently used.
    pub async fn last_topic(&self, session: &str) -> Option<String> {
        let mut topics = self.topics.write().await;

        if let Some(topic) = topics.shift_remove(session) {
            topics.insert(session.to_string(), topic.clone());
            Some(topic)
        } else {
            None
        }
    }

    /// Record the topic just resolved for this session.
    pub async fn set_last_topic(&self, session: &str, topic: &str) {
        let mut topics = self.topics.write().await;

        topics.shift_remove(session);
        topics.insert(session.to_string(), topic.to_string());

        while topics.len() > self.max_sessions {
            topics.shift_remove_index(0);
        }
    }

    /// Current number of tracked sessions.
    pub async fn session_count(&self) -> usize {
        self.topics.read().await.len()
    }
}

/// Whether a message is a follow-up referring to the previous topic.
pub(crate) fn is_continuation(text: &str) -> bool {
    let lowered = text.to_lowercase();
    let trimmed = lowered.trim().trim_end_matches(['.', '!', '?']);
    trimmed.starts_with("cuéntame más")
        || trimmed.starts_with("cuentame mas")
        || CONTINUATION_PHRASES.iter().any(|p| trimmed == *p)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_and_get_topic() {
        let sessions = SessionStore::new();

        sessions.set_last_topic("a", "Imperio inca").await;
        assert_eq!(sessions.last_topic("a").await.as_deref(), Some("Imperio inca"));
        assert_eq!(sessions.last_topic("b").await, None);
    }

    #[tokio::test]
    async fn test_topic_overwrite() {
        let sessions = SessionStore::new();

        sessions.set_last_topic("a", "Imperio inca").await;
        sessions.set_last_topic("a", "Civilización maya").await;
        assert_eq!(
            sessions.last_topic("a").await.as_deref(),
            Some("Civilización maya")
        );
    }

    #[tokio::test]
    async fn test_lru_eviction() {
        let sessions = SessionStore::with_limit(2);

        sessions.set_last_topic("a", "uno").await;
        sessions.set_last_topic("b", "dos").await;
        sessions.set_last_topic("c", "tres").await;

        assert_eq!(sessions.session_count().await, 2);
        assert_eq!(sessions.last_topic("a").await, None);
        assert!(sessions.last_topic("b").await.is_some());
        assert!(sessions.last_topic("c").await.is_some());
    }

    #[tokio::test]
    async fn test_lru_access_order() {
        let sessions = SessionStore::with_limit(2);

        sessions.set_last_topic("a", "uno").await;
        sessions.set_last_topic("b", "dos").await;

        // Touch "a" so "b" becomes the eviction candidate.
        let _ = sessions.last_topic("a").await;
        sessions.set_last_topic("c", "tres").await;

        assert_eq!(sessions.last_topic("b").await, None);
        assert!(sessions.last_topic("a").await.is_some());
    }

    #[test]
    fn test_is_continuation() {
        assert!(is_continuation("cuéntame más"));
        assert!(is_continuation("Cuéntame más sobre eso"));
        assert!(is_continuation("sigue"));
        assert!(is_continuation("más!"));
        assert!(!is_continuation("háblame de los incas"));
    }
}
