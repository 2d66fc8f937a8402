//! Durable key-value storage for UGC Prompt Studio
//!
//! Emulates browser local storage: a flat string map persisted as one JSON
//! file, capped by a byte quota.

mod autosave;
mod local;

pub use autosave::{AutoSaveTimer, AutoSaver, SaveOutcome};
pub use local::{LocalStore, MemoryStore, DEFAULT_QUOTA_BYTES};

use ugc_types::Result;

/// Key holding the auto-saved session snapshot
pub const AUTOSAVE_KEY: &str = "ugc_studio_autosave";

/// Key holding the selected theme name
pub const THEME_KEY: &str = "theme";

/// Key recording that the guided tour was completed or skipped
pub const ONBOARDING_KEY: &str = "ugc_studio_onboarding_completed";

/// String key-value storage
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Option<String>;

    /// Write a value. Fails without mutating anything when the quota would be exceeded.
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;

    fn remove_item(&mut self, key: &str) -> Result<()>;

    fn contains_key(&self, key: &str) -> bool {
        self.get_item(key).is_some()
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get_item(&self, key: &str) -> Option<String> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        (**self).remove_item(key)
    }
}
