//! Generator supervisor
//!
//! Spawns one [`SymbolWorker`] per configured symbol, splitting the
//! total target rate evenly (floor 1 event/sec per worker). All
//! workers share one transport sink, one monotonic sequence-id source,
//! and one total-sent counter; the only synchronization between them
//! is atomic increments on those counters.
//!
//! There is no per-symbol restart policy: workers only ever exit on
//! cancellation, and `stop` returns once every worker has exited.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::info;
use types::errors::ConfigError;
use types::symbol::Symbol;

use crate::config::GeneratorConfig;
use crate::rate::RateScheduler;
use crate::transport::TradeSink;
use crate::walker::{PriceWalker, WalkerConfig};
use crate::worker::{unix_millis, SymbolWorker};

/// Running generator: handle for observation and shutdown.
pub struct GeneratorSupervisor {
    cancel: CancellationToken,
    workers: Vec<JoinHandle<()>>,
    total_sent: Arc<AtomicU64>,
    per_symbol_sent: BTreeMap<Symbol, Arc<AtomicU64>>,
    per_worker_rate: u64,
}

impl GeneratorSupervisor {
    /// Validate the configuration and start one worker per symbol.
    ///
    /// On an invalid configuration no worker is spawned.
    pub fn start(
        config: GeneratorConfig,
        sink: Arc<dyn TradeSink>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let per_worker_rate = config.per_worker_rate();
        let cancel = CancellationToken::new();
        let total_sent = Arc::new(AtomicU64::new(0));
        // Sequence base from the wall clock, as a trade-id-like space
        // that stays unique across restarts.
        let sequence = Arc::new(AtomicU64::new(unix_millis() as u64 * 1_000));
        let seed_base = config.rng_seed.unwrap_or_else(|| unix_millis() as u64);

        let mut workers = Vec::with_capacity(config.symbols.len());
        let mut per_symbol_sent = BTreeMap::new();

        for (i, symbol) in config.symbols.iter().enumerate() {
            let sent = Arc::new(AtomicU64::new(0));
            per_symbol_sent.insert(symbol.clone(), sent.clone());

            let walker = PriceWalker::new(
                config.seed_price(symbol),
                WalkerConfig::default(),
                seed_base.wrapping_add(i as u64),
            );
            let worker = SymbolWorker::new(
                symbol.clone(),
                walker,
                RateScheduler::new(per_worker_rate),
                sink.clone(),
                sequence.clone(),
                total_sent.clone(),
                sent,
                cancel.child_token(),
                seed_base.wrapping_add(i as u64).wrapping_mul(2),
            );
            workers.push(tokio::spawn(worker.run()));
        }

        info!(
            symbols = config.symbols.len(),
            total_rate = config.total_rate,
            per_worker_rate,
            "Load generator started"
        );

        Ok(Self {
            cancel,
            workers,
            total_sent,
            per_symbol_sent,
            per_worker_rate,
        })
    }

    /// Total events sent across all workers.
    pub fn total_sent(&self) -> u64 {
        self.total_sent.load(Ordering::Relaxed)
    }

    /// Shared total-sent counter, for external periodic reporting.
    pub fn total_sent_counter(&self) -> Arc<AtomicU64> {
        self.total_sent.clone()
    }

    /// Events sent for one symbol, if it has a worker.
    pub fn sent_for(&self, symbol: &Symbol) -> Option<u64> {
        self.per_symbol_sent
            .get(symbol)
            .map(|c| c.load(Ordering::Relaxed))
    }

    /// Target rate assigned to each worker.
    pub fn per_worker_rate(&self) -> u64 {
        self.per_worker_rate
    }

    /// Number of running workers.
    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    /// Child token cancelled together with the supervisor; auxiliary
    /// tasks (stats reporting) tie their lifetime to it.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.child_token()
    }

    /// Cancel all workers and return once every one has exited.
    pub async fn stop(self) {
        info!("Stopping load generator");
        self.cancel.cancel();
        for handle in self.workers {
            // Workers never panic; a join error here means the runtime
            // is shutting down anyway.
            let _ = handle.await;
        }
        info!(
            total_sent = self.total_sent.load(Ordering::Relaxed),
            "Load generator stopped"
        );
    }
}
