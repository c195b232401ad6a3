//! Persisted record types.

use serde::{Deserialize, Serialize};

/// The user's durable profile.
///
/// Represented as a typed record rather than an open-ended mapping so
/// malformed persisted data is caught at load time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Name the user introduced themselves with, if any.
    #[serde(default)]
    pub name: Option<String>,
    /// Stated preferences ("me gusta ..."), in the order given.
    #[serde(default)]
    pub preferences: Vec<String>,
}

impl UserProfile {
    /// Record a preference, keeping insertion order and skipping duplicates.
    pub fn add_preference(&mut self, preference: impl Into<String>) {
        let preference = preference.into();
        if !self.preferences.contains(&preference) {
            self.preferences.push(preference);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile_is_empty() {
        let profile = UserProfile::default();
        assert!(profile.name.is_none());
        assert!(profile.preferences.is_empty());
    }

    #[test]
    fn test_add_preference_keeps_order() {
        let mut profile = UserProfile::default();
        profile.add_preference("la historia");
        profile.add_preference("el ajedrez");

        assert_eq!(profile.preferences, vec!["la historia", "el ajedrez"]);
    }

    #[test]
    fn test_add_preference_skips_duplicates() {
        let mut profile = UserProfile::default();
        profile.add_preference("la historia");
        profile.add_preference("la historia");

        assert_eq!(profile.preferences.len(), 1);
    }

    #[test]
    fn test_deserialize_partial_document() {
        // Older documents may miss fields entirely.
        let profile: UserProfile = serde_json::from_str(r#"{"name": "Henry"}"#).unwrap();
        assert_eq!(profile.name.as_deref(), Some("Henry"));
        assert!(profile.preferences.is_empty());
    }
}
