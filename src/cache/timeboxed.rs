//! Time-Boxed Cache Module
//!
//! Object cache over a shared key-value store. Entries are stamped on write
//! and only removed by an explicit sweep; reads never check expiry.

use std::fmt::{self, Display};
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::cache::{namespaced_key, CacheEntry, Cacheable, Clock, TTL_MS};
use crate::error::{CacheError, Result};
use crate::store::KvStore;

// == Sweep Report ==
/// Outcome of one sweep pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SweepReport {
    /// Namespaced keys examined
    pub scanned: usize,
    /// Expired entries deleted
    pub removed: usize,
    /// Fresh entries left in place
    pub retained: usize,
    /// Keys skipped because reading, decoding or deleting failed
    pub failed: usize,
}

enum SweepOutcome {
    Removed,
    Retained,
    Vanished,
}

// == Time-Boxed Cache ==
/// Cache of `T` objects persisted in a [`KvStore`].
///
/// Holds only shared handles, so clones are cheap and all see the same store.
pub struct TimeBoxedCache<T> {
    store: Arc<dyn KvStore>,
    clock: Arc<dyn Clock>,
    ttl_ms: i64,
    _payload: PhantomData<fn() -> T>,
}

impl<T> Clone for TimeBoxedCache<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            clock: self.clock.clone(),
            ttl_ms: self.ttl_ms,
            _payload: PhantomData,
        }
    }
}

impl<T> fmt::Debug for TimeBoxedCache<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimeBoxedCache")
            .field("clock", &self.clock)
            .field("ttl_ms", &self.ttl_ms)
            .finish_non_exhaustive()
    }
}

impl<T: Cacheable> TimeBoxedCache<T> {
    // == Constructor ==
    /// Creates a cache over `store`, reading time from `clock`.
    pub fn new(store: Arc<dyn KvStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            ttl_ms: TTL_MS,
            _payload: PhantomData,
        }
    }

    /// Maximum age before an entry becomes eligible for sweeping.
    pub fn ttl(&self) -> Duration {
        Duration::from_millis(self.ttl_ms as u64)
    }

    pub fn ttl_ms(&self) -> i64 {
        self.ttl_ms
    }

    /// Current time according to the cache's clock.
    pub fn now_ms(&self) -> i64 {
        self.clock.now_ms()
    }

    /// Store key for `id`.
    pub fn key_for(&self, id: impl Display) -> String {
        namespaced_key(T::KEY_PREFIX, id)
    }

    // == Get ==
    /// Returns the cached object for `id`.
    ///
    /// Stale entries are returned as long as they are present; only
    /// [`sweep`](Self::sweep) enforces the TTL.
    pub async fn get(&self, id: impl Display) -> Result<T> {
        let entry = self.entry(id).await?;
        debug!("Cache hit: {}", entry.key);
        entry.into_payload()
    }

    // == Entry ==
    /// Returns the raw entry for `id`, including its `cached_at` timestamp.
    pub async fn entry(&self, id: impl Display) -> Result<CacheEntry> {
        let key = self.key_for(id);
        match self.store.get(&key).await? {
            Some(raw) => CacheEntry::decode(key, &raw),
            None => {
                debug!("Cache miss: {}", key);
                Err(CacheError::NotFound { key })
            }
        }
    }

    /// Checks whether the entry for `id` has outlived the TTL.
    pub async fn is_expired(&self, id: impl Display) -> Result<bool> {
        let entry = self.entry(id).await?;
        Ok(entry.is_expired(self.clock.now_ms(), self.ttl_ms))
    }

    // == Put ==
    /// Stores `payload` under the key derived from its own id, replacing any
    /// previous entry.
    pub async fn put(&self, payload: &T) -> Result<()> {
        let key = self.key_for(payload.cache_id());
        let entry = CacheEntry::from_payload(key, payload, self.clock.now_ms())?;
        let raw = entry.encode()?;

        self.store.set(&entry.key, &raw).await?;
        debug!("Cached {} at {}", entry.key, entry.cached_at);
        Ok(())
    }

    // == Sweep ==
    /// Deletes every expired entry in this cache's namespace.
    ///
    /// Scans all keys in the store. A failure on one key is logged and
    /// counted without stopping the pass; only failing to list the keys
    /// aborts it.
    pub async fn sweep(&self) -> Result<SweepReport> {
        let now = self.clock.now_ms();
        let keys = self.store.all_keys().await?;
        let mut report = SweepReport::default();

        for key in keys.iter().filter(|k| k.starts_with(T::KEY_PREFIX)) {
            report.scanned += 1;
            match self.sweep_key(key, now).await {
                Ok(SweepOutcome::Removed) => report.removed += 1,
                Ok(SweepOutcome::Retained) => report.retained += 1,
                Ok(SweepOutcome::Vanished) => {}
                Err(e) => {
                    warn!("Sweep skipped {}: {}", key, e);
                    report.failed += 1;
                }
            }
        }

        if report.removed > 0 || report.failed > 0 {
            info!(
                "Sweep of {}*: scanned={}, removed={}, failed={}",
                T::KEY_PREFIX,
                report.scanned,
                report.removed,
                report.failed
            );
        }
        Ok(report)
    }

    async fn sweep_key(&self, key: &str, now: i64) -> Result<SweepOutcome> {
        let Some(raw) = self.store.get(key).await? else {
            return Ok(SweepOutcome::Vanished);
        };

        let entry = CacheEntry::decode(key, &raw)?;
        if !entry.is_expired(now, self.ttl_ms) {
            return Ok(SweepOutcome::Retained);
        }

        self.store.delete(key).await?;
        debug!("Swept {} (age {}ms)", key, entry.age_ms(now));
        Ok(SweepOutcome::Removed)
    }
}
