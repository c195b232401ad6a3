//! Persistent user profile: name and stated preferences.

use std::path::Path;

use storage::{JsonStore, StorageError, UserProfile};
use tokio::sync::RwLock;
use tracing::info;

/// Shared, persisted profile state.
///
/// The profile is loaded once at startup and written back after every
/// mutation; readers get cheap clones of the in-memory copy.
pub struct ProfileStore {
    profile: RwLock<UserProfile>,
    store: JsonStore<UserProfile>,
}

impl ProfileStore {
    /// Open the profile document at `path`, creating an empty profile if
    /// it does not exist or cannot be parsed.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let store = JsonStore::new(path.as_ref());
        let profile: UserProfile = store.load();

        if let Some(name) = &profile.name {
            info!(name = %name, "loaded user profile");
        }

        Self {
            profile: RwLock::new(profile),
            store,
        }
    }

    /// Current stored name, if any.
    pub async fn name(&self) -> Option<String> {
        self.profile.read().await.name.clone()
    }

    /// Stated preferences, in the order they were given.
    pub async fn preferences(&self) -> Vec<String> {
        self.profile.read().await.preferences.clone()
    }

    /// Record the user's name and persist the profile.
    pub async fn set_name(&self, name: &str) -> Result<(), StorageError> {
        let mut profile = self.profile.write().await;
        profile.name = Some(capitalize(name));
        self.store.save(&profile)
    }

    /// Record a preference (deduplicated, order-keeping) and persist.
    pub async fn add_preference(&self, preference: &str) -> Result<(), StorageError> {
        let mut profile = self.profile.write().await;
        profile.add_preference(preference);
        self.store.save(&profile)
    }
}

/// Extract the name from an introduction like "me llamo Henry".
pub(crate) fn parse_name(text: &str) -> Option<String> {
    let lowered = text.to_lowercase();
    let idx = lowered.find("me llamo")?;
    let rest = &lowered[idx + "me llamo".len()..];

    let name: String = rest
        .trim()
        .chars()
        .take_while(|c| c.is_alphabetic())
        .collect();

    if name.is_empty() {
        None
    } else {
        Some(capitalize(&name))
    }
}

/// Extract the preference from "me gusta la historia romana".
pub(crate) fn parse_preference(text: &str) -> Option<String> {
    let lowered = text.to_lowercase();
    let idx = lowered.find("me gusta")?;
    let rest = lowered[idx + "me gusta".len()..]
        .trim()
        .trim_end_matches(['.', '!', '?'])
        .to_string();

    if rest.is_empty() {
        None
    } else {
        Some(rest)
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.trim().chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_name() {
        assert_eq!(parse_name("me llamo henry"), Some("Henry".to_string()));
        assert_eq!(parse_name("Hola, me llamo Ana."), Some("Ana".to_string()));
        assert_eq!(parse_name("me llamo"), None);
    }

    #[test]
    fn test_parse_preference() {
        assert_eq!(
            parse_preference("me gusta la historia romana"),
            Some("la historia romana".to_string())
        );
        assert_eq!(parse_preference("me gusta"), None);
    }

    #[tokio::test]
    async fn test_set_name_persists() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("perfil.json");

        let store = ProfileStore::open(&path);
        store.set_name("henry").await.unwrap();
        assert_eq!(store.name().await, Some("Henry".to_string()));

        // Reopen and confirm the document survived.
        let reopened = ProfileStore::open(&path);
        assert_eq!(reopened.name().await, Some("Henry".to_string()));
    }

    #[tokio::test]
    async fn test_preferences_deduplicated() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("perfil.json");

        let store = ProfileStore::open(&path);
        store.add_preference("la historia").await.unwrap();
        store.add_preference("los mapas").await.unwrap();
        store.add_preference("la historia").await.unwrap();

        assert_eq!(
            store.preferences().await,
            vec!["la historia".to_string(), "los mapas".to_string()]
        );
    }
}
