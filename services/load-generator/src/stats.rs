//! Periodic throughput reporting
//!
//! Logs elapsed time, total sent, and average rate at a fixed
//! interval until the supervisor's cancellation token fires.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Default reporting interval.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);

/// Spawn the reporter task. It exits when `cancel` fires.
pub fn spawn_reporter(
    total_sent: Arc<AtomicU64>,
    interval: Duration,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let start = Instant::now();
        let mut ticker = tokio::time::interval(interval);
        // The first tick completes immediately; skip it.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {
                    let elapsed_s = start.elapsed().as_secs();
                    let sent = total_sent.load(Ordering::Relaxed);
                    let rate = if elapsed_s > 0 { sent / elapsed_s } else { 0 };
                    info!(elapsed_s, sent, rate_per_s = rate, "throughput");
                }
            }
        }
    })
}
