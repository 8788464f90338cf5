//! Periodic expiry sweep
//!
//! The caches never schedule work themselves. [`CleanupDriver`] is the
//! opt-in background task that calls [`CacheManager::sweep_expired`] on a
//! fixed interval until it is shut down.

use super::manager::CacheManager;
use osdk_domain::error::{Error, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Handle to a running sweep task
#[derive(Debug)]
pub struct CleanupDriver {
    cancel_token: CancellationToken,
    handle: JoinHandle<()>,
}

impl CleanupDriver {
    /// Start sweeping `manager` every `period`
    ///
    /// The first sweep runs one full period after the call.
    pub fn spawn(manager: Arc<CacheManager>, period: Duration) -> Result<Self> {
        if period.is_zero() {
            return Err(Error::invalid_argument("Cleanup interval cannot be zero"));
        }

        let cancel_token = CancellationToken::new();
        let token = cancel_token.clone();
        let handle = tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The first tick completes immediately
            ticker.tick().await;

            info!(interval_secs = period.as_secs(), "Cache cleanup task started");
            loop {
                tokio::select! {
                    () = token.cancelled() => break,
                    _ = ticker.tick() => {
                        let evicted = manager.sweep_expired().await;
                        debug!(evicted, "Cache cleanup cycle");
                    }
                }
            }
            info!("Cache cleanup task stopped");
        });

        Ok(Self {
            cancel_token,
            handle,
        })
    }

    /// Token that stops the task when cancelled
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel_token.clone()
    }

    /// Whether the task has exited
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Stop the task and wait for it to exit
    pub async fn shutdown(self) -> Result<()> {
        self.cancel_token.cancel();
        self.handle
            .await
            .map_err(|e| Error::infrastructure_with_source("Cache cleanup task failed", e))
    }
}
