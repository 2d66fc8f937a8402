//! Change-detecting auto-save of a serializable snapshot

use crate::KeyValueStore;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use ugc_types::Result;

/// Result of a save attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Payload differed from the last write and was stored
    Saved,
    /// Payload matched the last write; nothing was written
    Unchanged,
}

/// Writes snapshots under one key, skipping writes whose payload is unchanged
#[derive(Debug, Clone)]
pub struct AutoSaver {
    key: String,
    last_fingerprint: Option<String>,
}

fn fingerprint(payload: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(payload.as_bytes());
    format!("{:x}", hasher.finalize())
}

impl AutoSaver {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            last_fingerprint: None,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Serialize `snapshot` and write it if it differs from the last written payload.
    ///
    /// On failure the fingerprint is left untouched so the next attempt retries.
    pub fn save<S, T>(&mut self, store: &mut S, snapshot: &T) -> Result<SaveOutcome>
    where
        S: KeyValueStore + ?Sized,
        T: Serialize,
    {
        let payload = serde_json::to_string(snapshot)?;
        let print = fingerprint(&payload);
        if self.last_fingerprint.as_deref() == Some(print.as_str()) {
            debug!("Auto-save skipped: no changes");
            return Ok(SaveOutcome::Unchanged);
        }

        store.set_item(&self.key, &payload)?;
        self.last_fingerprint = Some(print);
        info!("Saved session ({} bytes)", payload.len());
        Ok(SaveOutcome::Saved)
    }

    /// Read the stored snapshot. Missing or unparseable data yields `None`.
    pub fn restore<S, T>(&mut self, store: &S) -> Option<T>
    where
        S: KeyValueStore + ?Sized,
        T: DeserializeOwned,
    {
        let payload = store.get_item(&self.key)?;
        match serde_json::from_str(&payload) {
            Ok(snapshot) => {
                self.last_fingerprint = Some(fingerprint(&payload));
                Some(snapshot)
            }
            Err(e) => {
                warn!("Ignoring unreadable auto-save data: {}", e);
                None
            }
        }
    }

    /// Remove the stored snapshot and forget the last fingerprint
    pub fn clear<S>(&mut self, store: &mut S) -> Result<()>
    where
        S: KeyValueStore + ?Sized,
    {
        self.last_fingerprint = None;
        store.remove_item(&self.key)
    }
}

/// Fixed-interval timer polled from an update loop
#[derive(Debug, Clone)]
pub struct AutoSaveTimer {
    interval: Duration,
    next_due: Instant,
}

impl AutoSaveTimer {
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            next_due: now + interval,
        }
    }

    /// True once per elapsed interval; re-arms itself when it fires
    pub fn poll(&mut self, now: Instant) -> bool {
        if now >= self.next_due {
            self.next_due = now + self.interval;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self, now: Instant) {
        self.next_due = now + self.interval;
    }

    /// Time left until the next firing
    pub fn remaining(&self, now: Instant) -> Duration {
        self.next_due.saturating_duration_since(now)
    }
}
