//! Persistent topic → answer cache with write-through semantics.

use std::collections::HashMap;
use std::path::Path;

use storage::{JsonStore, StorageError};
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Persistent mapping from normalized topic to previously fetched answer.
///
/// Keys are always normalizer output, never raw user input. The backing
/// JSON document is loaded once when the cache is opened and rewritten in
/// full (atomically) on every successful `put`. All access goes through an
/// async lock so concurrent misses on the same topic cannot clobber each
/// other's writes.
#[derive(Debug)]
pub struct KnowledgeCache {
    entries: RwLock<HashMap<String, String>>,
    store: JsonStore<HashMap<String, String>>,
}

impl KnowledgeCache {
    /// Open the cache backed by the given JSON document.
    ///
    /// A missing or malformed document degrades to an empty cache.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let store = JsonStore::new(path.as_ref());
        let entries: HashMap<String, String> = store.load();

        info!(
            "Knowledge cache loaded: {} entries from {}",
            entries.len(),
            path.as_ref().display()
        );

        Self {
            entries: RwLock::new(entries),
            store,
        }
    }

    /// Direct key lookup; no fuzzy matching.
    pub async fn get(&self, topic: &str) -> Option<String> {
        let entries = self.entries.read().await;
        entries.get(topic).cloned()
    }

    /// Insert an answer (most-recent-wins) and persist synchronously.
    ///
    /// The write lock is held across insert and persist so interleaved puts
    /// cannot lose updates.
    pub async fn put(&self, topic: &str, answer: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.write().await;
        entries.insert(topic.to_string(), answer.to_string());
        self.store.save(&entries)?;

        debug!("Cached answer for topic '{}'", topic);
        Ok(())
    }

    /// Number of cached topics.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the cache has no entries.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_then_get() {
        let dir = tempfile::tempdir().unwrap();
        let cache = KnowledgeCache::open(dir.path().join("conocimiento.json"));

        cache.put("Imperio inca", "Un estado andino.").await.unwrap();

        assert_eq!(
            cache.get("Imperio inca").await.as_deref(),
            Some("Un estado andino.")
        );
    }

    #[tokio::test]
    async fn test_get_missing_topic() {
        let dir = tempfile::tempdir().unwrap();
        let cache = KnowledgeCache::open(dir.path().join("conocimiento.json"));

        assert!(cache.get("Civilización maya").await.is_none());
    }

    #[tokio::test]
    async fn test_put_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let cache = KnowledgeCache::open(dir.path().join("conocimiento.json"));

        cache.put("tema", "primera").await.unwrap();
        cache.put("tema", "segunda").await.unwrap();

        assert_eq!(cache.get("tema").await.as_deref(), Some("segunda"));
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_persistence_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("conocimiento.json");

        {
            let cache = KnowledgeCache::open(&path);
            cache.put("Imperio inca", "Un estado andino.").await.unwrap();
            cache.put("Antiguo Egipto", "Civilización del Nilo.").await.unwrap();
        }

        // Simulate a process restart.
        let reloaded = KnowledgeCache::open(&path);
        assert_eq!(reloaded.len().await, 2);
        assert_eq!(
            reloaded.get("Imperio inca").await.as_deref(),
            Some("Un estado andino.")
        );
        assert_eq!(
            reloaded.get("Antiguo Egipto").await.as_deref(),
            Some("Civilización del Nilo.")
        );
    }

    #[tokio::test]
    async fn test_corrupt_document_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("conocimiento.json");
        std::fs::write(&path, "{{{{").unwrap();

        let cache = KnowledgeCache::open(&path);
        assert!(cache.is_empty().await);

        // And the cache is still usable afterwards.
        cache.put("tema", "respuesta").await.unwrap();
        assert_eq!(cache.get("tema").await.as_deref(), Some("respuesta"));
    }
}
