//! Atomic-replace JSON document store.

use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::Result;

/// A single JSON document on disk, read and rewritten in full.
///
/// `load` never fails: a missing or malformed file degrades to
/// `T::default()` so corrupt persisted state is not a fatal error. `save`
/// writes to a temporary file in the same directory and renames it over the
/// target, so a crash mid-write never leaves a truncated document behind.
#[derive(Debug, Clone)]
pub struct JsonStore<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T> JsonStore<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    /// Create a store backed by the given path.
    ///
    /// The file is not touched until the first `save`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _marker: PhantomData,
        }
    }

    /// The path of the backing document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the document, substituting the default value on any failure.
    pub fn load(&self) -> T {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No document at {}, starting empty", self.path.display());
                return T::default();
            }
            Err(e) => {
                warn!("Failed to read {}: {}", self.path.display(), e);
                return T::default();
            }
        };

        match serde_json::from_str(&content) {
            Ok(value) => value,
            Err(e) => {
                warn!(
                    "Malformed document at {}: {} (starting empty)",
                    self.path.display(),
                    e
                );
                T::default()
            }
        }
    }

    /// Persist the document via atomic replace.
    pub fn save(&self, value: &T) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(value)?;

        // Write to a sibling temp file, then rename over the target. Rename
        // within one directory is atomic on the platforms we care about.
        let tmp_path = self.tmp_path();
        std::fs::write(&tmp_path, json.as_bytes())?;
        std::fs::rename(&tmp_path, &self.path)?;

        debug!("Persisted {}", self.path.display());
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".to_string());
        self.path.with_file_name(format!(".{}.tmp", file_name))
    }
}
