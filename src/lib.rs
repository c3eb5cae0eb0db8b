//! Movie Cache - A time-boxed object cache for movie detail records
//!
//! Stores records in a pluggable key-value store, stamps them on write and
//! removes entries older than seven days when swept.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
pub mod tasks;

pub use api::{AppState, MovieCache};
pub use cache::{Cacheable, Clock, SweepReport, SystemClock, TimeBoxedCache};
pub use config::{Config, StoreBackend};
pub use error::{CacheError, StoreError};
pub use store::{FileStore, KvStore, MemoryStore};
pub use tasks::spawn_sweep_task;
