//! # Persistence Collaborators
//!
//! Traits for the three external services the composer talks to: the
//! remote persistence store (source of truth across sessions), the local
//! device cache (resilience fallback, never authoritative), and the
//! notification channel (fire-and-forget user-visible messages), plus
//! in-memory implementations for tests and local development.

use crate::record::{PersistenceRecord, ValidationError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PersistenceError {
    #[error("Remote read failed: {0}")]
    ReadFailed(String),

    #[error("Remote write failed: {0}")]
    WriteFailed(String),

    #[error("Record rejected: {0}")]
    Validation(#[from] ValidationError),
}

/// Remote data store, the cross-session source of truth. Writes are
/// blind upserts; there is no concurrency token.
#[async_trait]
pub trait PersistenceStore: Send + Sync {
    async fn load(&self, owner_id: &str) -> Result<Option<PersistenceRecord>, PersistenceError>;
    async fn save(
        &self,
        owner_id: &str,
        record: &PersistenceRecord,
    ) -> Result<(), PersistenceError>;
}

/// Local device cache: byte/string key-value, used only as a fallback
pub trait DeviceCache: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: String);
    fn remove(&self, key: &str);
}

/// User-visible outcomes the core decides to surface. Rendering is the
/// host application's problem.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    SaveSucceeded,
    SaveFailed(String),
    Published { url: String },
    PublishFailed(String),
}

/// Fire-and-forget notification channel
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Cache key for one account's record mirror
pub fn cache_key(owner_id: &str) -> String {
    format!("sitecraft.record.{owner_id}")
}

/// Load an account's record: remote first, device-cache fallback when
/// the remote read fails, fresh first-run record when neither has one.
pub async fn load_or_default(
    store: &dyn PersistenceStore,
    cache: &dyn DeviceCache,
    owner_id: &str,
) -> PersistenceRecord {
    match store.load(owner_id).await {
        Ok(Some(record)) => record,
        Ok(None) => PersistenceRecord::first_run(),
        Err(e) => {
            warn!(owner_id, error = %e, "remote load failed, trying device cache");
            cache
                .get(&cache_key(owner_id))
                .and_then(|raw| match PersistenceRecord::from_json(&raw) {
                    Ok(record) => Some(record),
                    Err(e) => {
                        warn!(owner_id, error = %e, "cached record unusable");
                        None
                    }
                })
                .unwrap_or_else(PersistenceRecord::first_run)
        }
    }
}

/// In-memory persistence store. Counts saves and can be told to fail
/// the next N writes, which is all the autosave tests need.
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<String, PersistenceRecord>>,
    save_calls: AtomicUsize,
    fail_remaining: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `n` saves fail with a write error
    pub fn fail_next_saves(&self, n: usize) {
        self.fail_remaining.store(n, Ordering::SeqCst);
    }

    pub fn save_calls(&self) -> usize {
        self.save_calls.load(Ordering::SeqCst)
    }

    pub fn record_for(&self, owner_id: &str) -> Option<PersistenceRecord> {
        self.records
            .lock()
            .ok()
            .and_then(|records| records.get(owner_id).cloned())
    }
}

#[async_trait]
impl PersistenceStore for MemoryStore {
    async fn load(&self, owner_id: &str) -> Result<Option<PersistenceRecord>, PersistenceError> {
        Ok(self.record_for(owner_id))
    }

    async fn save(
        &self,
        owner_id: &str,
        record: &PersistenceRecord,
    ) -> Result<(), PersistenceError> {
        self.save_calls.fetch_add(1, Ordering::SeqCst);

        let failing = self
            .fail_remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failing {
            return Err(PersistenceError::WriteFailed("simulated outage".to_string()));
        }

        if let Ok(mut records) = self.records.lock() {
            records.insert(owner_id.to_string(), record.clone());
        }
        Ok(())
    }
}

/// In-memory device cache
#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DeviceCache for MemoryCache {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .ok()
            .and_then(|entries| entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: String) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), value);
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.remove(key);
        }
    }
}

/// Notifier that drops everything
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _notice: Notice) {}
}

/// Notifier that records notices for assertions
#[derive(Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().map(|n| n.clone()).unwrap_or_default()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        if let Ok(mut notices) = self.notices.lock() {
            notices.push(notice);
        }
    }
}
