//! Fixtures shared by the cache tests.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::cache::Cacheable;
use crate::error::{StoreError, StoreResult};
use crate::store::{KvStore, MemoryStore};

/// Minimal payload with its own namespace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: u32,
    pub text: String,
}

impl Cacheable for Note {
    type Id = u32;
    const KEY_PREFIX: &'static str = "note_";

    fn cache_id(&self) -> u32 {
        self.id
    }
}

/// Memory store that fails selected operations on demand.
#[derive(Debug)]
pub struct FaultyStore {
    inner: Arc<MemoryStore>,
    failing_reads: Mutex<HashSet<String>>,
    failing_deletes: Mutex<HashSet<String>>,
    phantom_keys: Mutex<Vec<String>>,
    fail_listing: AtomicBool,
    fail_writes: AtomicBool,
}

impl FaultyStore {
    pub fn new(inner: Arc<MemoryStore>) -> Self {
        Self {
            inner,
            failing_reads: Mutex::new(HashSet::new()),
            failing_deletes: Mutex::new(HashSet::new()),
            phantom_keys: Mutex::new(Vec::new()),
            fail_listing: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
        }
    }

    pub fn fail_reads_of(&self, key: &str) {
        self.failing_reads.lock().unwrap().insert(key.to_string());
    }

    pub fn fail_deletes_of(&self, key: &str) {
        self.failing_deletes.lock().unwrap().insert(key.to_string());
    }

    /// Lists `key` without storing it, as if it was deleted mid-sweep.
    pub fn report_phantom_key(&self, key: &str) {
        self.phantom_keys.lock().unwrap().push(key.to_string());
    }

    pub fn fail_listing(&self) {
        self.fail_listing.store(true, Ordering::SeqCst);
    }

    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }
}

fn injected(op: &str) -> StoreError {
    StoreError::Unavailable(format!("injected {} failure", op))
}

#[async_trait]
impl KvStore for FaultyStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        if self.failing_reads.lock().unwrap().contains(key) {
            return Err(injected("read"));
        }
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(injected("write"));
        }
        self.inner.set(key, value).await
    }

    async fn delete(&self, key: &str) -> StoreResult<()> {
        if self.failing_deletes.lock().unwrap().contains(key) {
            return Err(injected("delete"));
        }
        self.inner.delete(key).await
    }

    async fn all_keys(&self) -> StoreResult<Vec<String>> {
        if self.fail_listing.load(Ordering::SeqCst) {
            return Err(injected("list"));
        }
        let mut keys = self.inner.all_keys().await?;
        keys.extend(self.phantom_keys.lock().unwrap().iter().cloned());
        Ok(keys)
    }
}
