//! Background expiry of idle sessions.
//!
//! A session with no activity persists indefinitely unless this reaper is
//! running; enable it by setting `session_max_idle` in [`ArenaConfig`] and
//! spawning [`SessionReaper::run`].
//!
//! [`ArenaConfig`]: crate::config::ArenaConfig

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::registry::SessionRegistry;

/// Minimum check interval, so a tiny idle bound cannot busy-loop the task.
const MIN_RESOLUTION: Duration = Duration::from_secs(5);

pub struct SessionReaper {
    registry: Arc<SessionRegistry>,
    max_idle: Duration,
    cancel: CancellationToken,
}

impl SessionReaper {
    pub fn new(registry: Arc<SessionRegistry>, max_idle: Duration, cancel: CancellationToken) -> Self {
        Self {
            registry,
            max_idle,
            cancel,
        }
    }

    /// Run the reaper loop. Blocks until the cancellation token fires.
    pub async fn run(&self) {
        let interval = self.max_idle.max(MIN_RESOLUTION);
        loop {
            tokio::select! {
                _ = self.cancel.cancelled() => break,
                _ = tokio::time::sleep(interval) => {
                    self.reap_once();
                }
            }
        }
    }

    /// Perform a single reap pass. Returns the number of sessions removed.
    pub fn reap_once(&self) -> usize {
        let reaped = self.registry.reap_idle(self.max_idle);
        for arena in &reaped {
            debug!(%arena, "idle session expired");
        }
        reaped.len()
    }
}
