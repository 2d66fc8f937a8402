//! JSON-file and in-memory key-value stores

use crate::KeyValueStore;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use ugc_types::{Result, StorageError};

/// Default byte quota, matching the common browser local storage limit
pub const DEFAULT_QUOTA_BYTES: usize = 5 * 1024 * 1024;

const STORE_FILE: &str = "local_storage.json";

/// Written first, then renamed over the store file
const TEMP_FILE: &str = "local_storage.json.tmp";

fn usage(entries: &BTreeMap<String, String>) -> usize {
    entries.iter().map(|(k, v)| k.len() + v.len()).sum()
}

/// Bytes the map would use after writing `key = value`
fn usage_after(entries: &BTreeMap<String, String>, key: &str, value: &str) -> usize {
    let current = usage(entries);
    let replaced = entries.get(key).map(|old| key.len() + old.len()).unwrap_or(0);
    current - replaced + key.len() + value.len()
}

/// Key-value map persisted to `local_storage.json`
pub struct LocalStore {
    store_path: PathBuf,
    entries: BTreeMap<String, String>,
    quota: usize,
}

impl LocalStore {
    /// Create or load a store in `store_dir`
    pub fn open(store_dir: &Path) -> Result<Self> {
        Self::open_with_quota(store_dir, DEFAULT_QUOTA_BYTES)
    }

    pub fn open_with_quota(store_dir: &Path, quota: usize) -> Result<Self> {
        fs::create_dir_all(store_dir)?;
        let store_path = store_dir.join(STORE_FILE);

        let entries = if store_path.exists() {
            let file = File::open(&store_path)?;
            let reader = BufReader::new(file);
            match serde_json::from_reader(reader) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!("Ignoring unreadable store {}: {}", store_path.display(), e);
                    BTreeMap::new()
                }
            }
        } else {
            BTreeMap::new()
        };

        debug!(
            "Opened store {} ({} keys)",
            store_path.display(),
            entries.len()
        );
        Ok(Self {
            store_path,
            entries,
            quota,
        })
    }

    pub fn path(&self) -> &Path {
        &self.store_path
    }

    /// Bytes currently used by keys and values
    pub fn used_bytes(&self) -> usize {
        usage(&self.entries)
    }

    pub fn quota(&self) -> usize {
        self.quota
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    fn save(&self) -> Result<()> {
        let temp_path = self.store_path.with_file_name(TEMP_FILE);
        let io_error =
            |path: &Path, e: std::io::Error| StorageError::IoError(format!("{}: {}", path.display(), e));

        let file = File::create(&temp_path).map_err(|e| io_error(temp_path.as_path(), e))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &self.entries)?;
        writer.flush().map_err(|e| io_error(temp_path.as_path(), e))?;
        writer
            .get_ref()
            .sync_all()
            .map_err(|e| io_error(temp_path.as_path(), e))?;

        fs::rename(&temp_path, &self.store_path).map_err(|e| io_error(self.store_path.as_path(), e))?;
        Ok(())
    }
}

impl KeyValueStore for LocalStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        let needed = usage_after(&self.entries, key, value);
        if needed > self.quota {
            return Err(StorageError::QuotaExceeded {
                needed,
                quota: self.quota,
            }
            .into());
        }

        let previous = self.entries.insert(key.to_string(), value.to_string());
        if let Err(e) = self.save() {
            // Keep the map in step with the file
            match previous {
                Some(old) => self.entries.insert(key.to_string(), old),
                None => self.entries.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        let Some(old) = self.entries.remove(key) else {
            return Ok(());
        };
        if let Err(e) = self.save() {
            self.entries.insert(key.to_string(), old);
            return Err(e);
        }
        Ok(())
    }
}

/// Non-persistent store with the same quota semantics
#[derive(Debug, Clone)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
    quota: usize,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::with_quota(DEFAULT_QUOTA_BYTES)
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota: usize) -> Self {
        Self {
            entries: BTreeMap::new(),
            quota,
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        let needed = usage_after(&self.entries, key, value);
        if needed > self.quota {
            return Err(StorageError::QuotaExceeded {
                needed,
                quota: self.quota,
            }
            .into());
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}
