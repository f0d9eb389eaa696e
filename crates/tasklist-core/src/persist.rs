use std::cell::Cell;
use std::collections::BTreeSet;
use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::PersistError;
use crate::item::Item;
use crate::storage::KeyValueStore;

/// The whole collection as of one committed mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub revision: u64,
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Written,
    /// A newer revision was already written; this one was dropped.
    Stale,
}

/// Exponential backoff for failed snapshot writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 100,
            max_delay_ms: 2_000,
        }
    }
}

impl RetryPolicy {
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// Delay before retry number `attempt` (1-based): base, 2×base, 4×base…
    /// capped at `max_delay_ms`.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let shift = attempt.saturating_sub(1).min(20);
        let millis = self
            .base_delay_ms
            .saturating_mul(1u64 << shift)
            .min(self.max_delay_ms);
        Duration::from_millis(millis)
    }
}

/// Loads and saves the full item list under one fixed key.
#[derive(Debug)]
pub struct Persistence<S> {
    store: S,
    key: String,
    last_written: Cell<Option<u64>>,
}

impl<S: KeyValueStore> Persistence<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            last_written: Cell::new(None),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn last_written(&self) -> Option<u64> {
        self.last_written.get()
    }

    /// Reads the stored list. `Ok(None)` means nothing was ever saved.
    #[tracing::instrument(skip(self), fields(key = %self.key))]
    pub async fn load(&self) -> Result<Option<Vec<Item>>, PersistError> {
        let Some(raw) = self.store.get(&self.key).await? else {
            debug!("no stored items");
            return Ok(None);
        };

        let items = decode_items(&self.key, &raw)?;
        info!(count = items.len(), "loaded stored items");
        Ok(Some(items))
    }

    /// Writes `snapshot` over the stored list unless a newer revision has
    /// already been written.
    #[tracing::instrument(skip(self, snapshot), fields(key = %self.key, revision = snapshot.revision))]
    pub async fn save(&self, snapshot: &Snapshot) -> Result<SaveOutcome, PersistError> {
        if self.is_stale(snapshot.revision) {
            debug!(last = ?self.last_written.get(), "skipping stale snapshot");
            return Ok(SaveOutcome::Stale);
        }

        let payload = encode_items(&snapshot.items)?;
        self.store.set(&self.key, &payload).await?;

        // A newer revision may have landed while this write was pending.
        if !self.is_stale(snapshot.revision) {
            self.last_written.set(Some(snapshot.revision));
        }
        debug!(count = snapshot.items.len(), "saved snapshot");
        Ok(SaveOutcome::Written)
    }

    /// [`save`](Self::save) with backoff between failed attempts.
    ///
    /// `sleep` is supplied by the caller so the core stays independent of
    /// any particular async runtime.
    pub async fn save_with_retry<F, Fut>(
        &self,
        snapshot: &Snapshot,
        policy: &RetryPolicy,
        mut sleep: F,
    ) -> Result<SaveOutcome, PersistError>
    where
        F: FnMut(Duration) -> Fut,
        Fut: Future<Output = ()>,
    {
        let max_attempts = policy.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            match self.save(snapshot).await {
                Ok(outcome) => return Ok(outcome),
                Err(err) if err.is_retryable() && attempt < max_attempts => {
                    let delay = policy.delay_for(attempt);
                    warn!(
                        error = %err,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        "snapshot write failed, retrying"
                    );
                    sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => {
                    warn!(error = %err, attempt, "giving up on snapshot write");
                    return Err(err);
                }
            }
        }
    }

    fn is_stale(&self, revision: u64) -> bool {
        self.last_written
            .get()
            .is_some_and(|last| revision <= last)
    }
}

pub fn encode_items(items: &[Item]) -> Result<String, PersistError> {
    Ok(serde_json::to_string(items)?)
}

/// Parses a stored list, rejecting anything that is not an array of
/// well-formed records with distinct ids that leave room for another id.
pub fn decode_items(key: &str, raw: &str) -> Result<Vec<Item>, PersistError> {
    let malformed = |reason: String| PersistError::Malformed {
        key: key.to_string(),
        reason,
    };

    let items: Vec<Item> = serde_json::from_str(raw).map_err(|err| malformed(err.to_string()))?;

    let mut seen = BTreeSet::new();
    for item in &items {
        if item.id == u64::MAX {
            return Err(malformed(format!("id {} leaves no room for new items", item.id)));
        }
        if !seen.insert(item.id) {
            return Err(malformed(format!("duplicate id {}", item.id)));
        }
    }

    Ok(items)
}
