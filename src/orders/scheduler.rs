//! Archive scheduler
//!
//! Periodic background task that fires one archive cycle per configured
//! interval (default 24 h). The interval runs from process start; it is not
//! anchored to calendar midnight, so a restart shifts the schedule — the
//! accepted reference behavior.

use std::time::Duration;

use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use super::archive::ArchiveService;

/// Periodic driver around [`ArchiveService`].
pub struct ArchiveScheduler {
    service: ArchiveService,
    period: Duration,
}

impl ArchiveScheduler {
    pub fn new(service: ArchiveService, period: Duration) -> Self {
        Self { service, period }
    }

    /// Run until the shutdown token fires.
    ///
    /// The first cycle fires one full period after start, never immediately.
    /// A missed tick is delayed, not burst-replayed.
    pub async fn run(self, shutdown: CancellationToken) {
        tracing::info!(period_secs = self.period.as_secs(), "ArchiveScheduler started");

        let mut ticks = time::interval_at(Instant::now() + self.period, self.period);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticks.tick() => {
                    self.service.run_cycle();
                }
                _ = shutdown.cancelled() => {
                    tracing::info!("ArchiveScheduler shutting down");
                    break;
                }
            }
        }
    }
}
