//! JSON document persistence layer for Atlas.
//!
//! This crate persists the assistant's two durable stores - the user profile
//! and the topic cache - as independent flat JSON documents on local disk.
//! Each document is read in full at load time and rewritten in full
//! (atomically) on mutation.
//!
//! # Example
//!
//! ```no_run
//! use storage::{JsonStore, UserProfile};
//!
//! fn main() -> Result<(), storage::StorageError> {
//!     let store: JsonStore<UserProfile> = JsonStore::new("data/perfil.json");
//!
//!     // Missing or corrupt files degrade to the default value.
//!     let mut profile = store.load();
//!     profile.name = Some("Henry".to_string());
//!     store.save(&profile)?;
//!
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod models;
pub mod store;

pub use error::{Result, StorageError};
pub use models::UserProfile;
pub use store::JsonStore;
