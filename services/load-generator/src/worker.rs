//! Per-symbol generation worker
//!
//! One worker owns one price walker and one rate scheduler and emits
//! trade events to the transport boundary until cancelled. The rate
//! pause is the sole suspension point and it is interruptible: a
//! pending pause is raced against the cancellation token, so shutdown
//! latency is bounded by the pause duration, never slept through.
//!
//! Per-event transport failures are logged with symbol context and the
//! event is dropped; load generation survives transient transport
//! errors by design of the enclosing pipeline.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, warn};
use types::event::TradeEvent;
use types::symbol::Symbol;

use crate::rate::RateScheduler;
use crate::transport::TradeSink;
use crate::walker::PriceWalker;

/// Current wall-clock time in Unix milliseconds.
pub(crate) fn unix_millis() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or_default()
}

/// One concurrent unit of work: generates trades for a single symbol
/// at an assigned rate until cancelled.
pub struct SymbolWorker {
    symbol: Symbol,
    walker: PriceWalker,
    scheduler: RateScheduler,
    sink: Arc<dyn TradeSink>,
    /// Shared monotonic sequence-id source.
    sequence: Arc<AtomicU64>,
    /// Shared total across all workers.
    total_sent: Arc<AtomicU64>,
    /// This worker's own sent counter.
    sent: Arc<AtomicU64>,
    cancel: CancellationToken,
    rng: ChaCha8Rng,
}

impl SymbolWorker {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        symbol: Symbol,
        walker: PriceWalker,
        scheduler: RateScheduler,
        sink: Arc<dyn TradeSink>,
        sequence: Arc<AtomicU64>,
        total_sent: Arc<AtomicU64>,
        sent: Arc<AtomicU64>,
        cancel: CancellationToken,
        rng_seed: u64,
    ) -> Self {
        Self {
            symbol,
            walker,
            scheduler,
            sink,
            sequence,
            total_sent,
            sent,
            cancel,
            rng: ChaCha8Rng::seed_from_u64(rng_seed),
        }
    }

    /// Run until cancellation. Cancellation is observed at least once
    /// per iteration, including during a pending pause.
    pub async fn run(mut self) {
        let start = Instant::now();
        // Pacing counts attempts, so a failing transport does not turn
        // the loop into a hot spin.
        let mut attempted: u64 = 0;

        debug!(
            symbol = %self.symbol,
            rate = self.scheduler.target_rate(),
            "Symbol worker started"
        );

        loop {
            if self.cancel.is_cancelled() {
                break;
            }

            let (price, quantity) = self.walker.next();
            let is_buyer_maker = self.rng.gen_bool(0.5);
            let sequence_id = self.sequence.fetch_add(1, Ordering::Relaxed);
            let event = TradeEvent::new(
                self.symbol.clone(),
                price,
                quantity,
                is_buyer_maker,
                sequence_id,
                unix_millis(),
            );

            attempted += 1;
            match event.to_payload() {
                Ok(payload) => match self.sink.publish(event.partition_key(), payload).await {
                    Ok(()) => {
                        self.sent.fetch_add(1, Ordering::Relaxed);
                        self.total_sent.fetch_add(1, Ordering::Relaxed);
                    }
                    Err(err) => {
                        warn!(
                            symbol = %self.symbol,
                            sequence = sequence_id,
                            error = %err,
                            "Publish failed, dropping event"
                        );
                    }
                },
                Err(err) => {
                    error!(
                        symbol = %self.symbol,
                        sequence = sequence_id,
                        error = %err,
                        "Encode failed, dropping event"
                    );
                }
            }

            let pause = self.scheduler.pause_for(attempted, start.elapsed());
            if pause.is_zero() {
                // Behind or on schedule: just yield to peers.
                tokio::task::yield_now().await;
            } else {
                tokio::select! {
                    _ = self.cancel.cancelled() => break,
                    _ = tokio::time::sleep(pause) => {}
                }
            }
        }

        debug!(
            symbol = %self.symbol,
            sent = self.sent.load(Ordering::Relaxed),
            "Symbol worker stopped"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::{FailingSink, RecordingSink};
    use crate::walker::WalkerConfig;
    use rust_decimal::Decimal;
    use std::time::Duration;

    struct Harness {
        sequence: Arc<AtomicU64>,
        total_sent: Arc<AtomicU64>,
        sent: Arc<AtomicU64>,
        cancel: CancellationToken,
    }

    fn spawn_worker(
        rate: u64,
        sink: Arc<dyn TradeSink>,
    ) -> (Harness, tokio::task::JoinHandle<()>) {
        let harness = Harness {
            sequence: Arc::new(AtomicU64::new(1_000)),
            total_sent: Arc::new(AtomicU64::new(0)),
            sent: Arc::new(AtomicU64::new(0)),
            cancel: CancellationToken::new(),
        };
        let walker = PriceWalker::new(Decimal::from(85_000), WalkerConfig::default(), 42);
        let worker = SymbolWorker::new(
            Symbol::new("BTCUSDT"),
            walker,
            RateScheduler::new(rate),
            sink,
            harness.sequence.clone(),
            harness.total_sent.clone(),
            harness.sent.clone(),
            harness.cancel.clone(),
            7,
        );
        let handle = tokio::spawn(worker.run());
        (harness, handle)
    }

    #[tokio::test(start_paused = true)]
    async fn test_worker_sustains_target_rate() {
        let sink = Arc::new(RecordingSink::new());
        let (harness, handle) = spawn_worker(100, sink.clone());

        tokio::time::sleep(Duration::from_secs(1)).await;
        harness.cancel.cancel();
        handle.await.unwrap();

        let sent = harness.sent.load(Ordering::Relaxed);
        assert!(
            (90..=110).contains(&sent),
            "expected ~100 events in 1s, got {sent}"
        );
        assert_eq!(sent, harness.total_sent.load(Ordering::Relaxed));
        assert_eq!(sent as usize, sink.count().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancellation_interrupts_pending_pause() {
        let sink = Arc::new(RecordingSink::new());
        // 1 event/sec: the worker spends nearly all its time paused
        let (harness, handle) = spawn_worker(1, sink.clone());

        tokio::time::sleep(Duration::from_millis(100)).await;
        harness.cancel.cancel();
        handle.await.unwrap();

        let after_stop = sink.count().await;
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(sink.count().await, after_stop, "event sent after cancellation");
    }

    #[tokio::test(start_paused = true)]
    async fn test_transport_failures_do_not_kill_worker() {
        let sink = Arc::new(FailingSink::new());
        let (harness, handle) = spawn_worker(100, sink.clone());

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(!handle.is_finished(), "worker exited on transport error");
        assert!(sink.attempts() > 10);
        // Nothing was counted as sent
        assert_eq!(harness.sent.load(Ordering::Relaxed), 0);

        harness.cancel.cancel();
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_emitted_events_are_valid_and_sequenced() {
        let sink = Arc::new(RecordingSink::new());
        let (harness, handle) = spawn_worker(50, sink.clone());

        tokio::time::sleep(Duration::from_millis(500)).await;
        harness.cancel.cancel();
        handle.await.unwrap();

        let published = sink.published().await;
        assert!(!published.is_empty());

        let mut last_sequence = None;
        let mut last_time = 0;
        for (key, payload) in published {
            let event = TradeEvent::from_payload(&payload).unwrap();
            assert_eq!(key, "BTCUSDT");
            assert!(event.is_valid());
            if let Some(last) = last_sequence {
                assert!(event.sequence_id > last, "sequence ids not increasing");
            }
            assert!(event.event_time_ms >= last_time, "event time regressed");
            last_sequence = Some(event.sequence_id);
            last_time = event.event_time_ms;
        }
    }
}
