//! Cache Module
//!
//! Time-boxed object caching on top of a persistent key-value store.

mod clock;
mod entry;
mod key;
mod timeboxed;

#[cfg(test)]
mod test_support;

// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::{CacheEntry, CACHED_AT_FIELD};
pub use key::{namespaced_key, Cacheable};
pub use timeboxed::{SweepReport, TimeBoxedCache};

// == Public Constants ==
/// Age after which an entry is removed by a sweep: 7 days, in milliseconds.
pub const TTL_MS: i64 = 7 * 24 * 60 * 60 * 1000;
