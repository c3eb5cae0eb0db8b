//! Periodic Sweep Task
//!
//! Background task that periodically removes expired cache entries.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::cache::{Cacheable, TimeBoxedCache};

/// Spawns a background task that sweeps `cache` every `interval`.
///
/// The task sleeps first, so the initial sweep happens one interval after
/// spawning. A failed sweep is logged and retried on the next tick.
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
///
/// # Example
/// ```ignore
/// let handle = spawn_sweep_task(cache.clone(), Duration::from_secs(3600));
/// // Later, during shutdown:
/// handle.abort();
/// ```
pub fn spawn_sweep_task<T>(cache: TimeBoxedCache<T>, interval: Duration) -> JoinHandle<()>
where
    T: Cacheable + 'static,
{
    tokio::spawn(async move {
        info!("Starting sweep task with interval of {:?}", interval);

        loop {
            tokio::time::sleep(interval).await;

            match cache.sweep().await {
                Ok(report) if report.removed > 0 => {
                    info!("Sweep: removed {} expired entries", report.removed)
                }
                Ok(_) => debug!("Sweep: no expired entries found"),
                Err(e) => warn!("Sweep failed: {}", e),
            }
        }
    })
}
