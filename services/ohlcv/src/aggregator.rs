//! Stateless OHLCV aggregation algebra
//!
//! Operates on [`OhlcvAccumulator`] values owned by the windowing
//! engine: initialize, fold in one trade event, merge two partial
//! accumulators, extract the final bar.
//!
//! Fold assumes events arrive in non-decreasing event-time order
//! within a window; folding out of order yields a `close` equal to the
//! last-folded event rather than the chronologically last trade. This
//! is a documented limitation, not corrected here.
//!
//! Merge is associative over disjoint event sets and has
//! `OhlcvAggregator::initialize()` as its identity, so parallel rescale
//! and checkpoint recovery never change the final bar values.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;
use types::errors::AggregationError;
use types::event::TradeEvent;

use crate::accumulator::OhlcvAccumulator;

/// Final OHLCV bar extracted from a closed window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OhlcvBar {
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: Decimal,
    /// Volume-weighted average price; zero when volume is zero.
    pub vwap: Decimal,
    pub buy_volume: Decimal,
    pub sell_volume: Decimal,
    pub count: u64,
}

/// Stateless aggregation algebra over [`OhlcvAccumulator`].
pub struct OhlcvAggregator;

impl OhlcvAggregator {
    /// Create an empty accumulator with all fields at neutral values.
    pub fn initialize() -> OhlcvAccumulator {
        OhlcvAccumulator::default()
    }

    /// Fold one trade event into the accumulator.
    pub fn fold(acc: &mut OhlcvAccumulator, event: &TradeEvent) {
        if !acc.initialized {
            acc.open = event.price;
            acc.high = event.price;
            acc.low = event.price;
            acc.initialized = true;
            acc.first_event_time_ms = event.event_time_ms;
        } else {
            if event.price > acc.high {
                acc.high = event.price;
            }
            if event.price < acc.low {
                acc.low = event.price;
            }
        }

        // Last-folded wins; within a window events arrive in
        // non-decreasing event-time order.
        acc.close = event.price;
        acc.last_event_time_ms = event.event_time_ms;

        acc.volume += event.quantity;
        acc.price_volume_sum += event.price * event.quantity;
        if event.taker_is_buyer() {
            acc.buy_volume += event.quantity;
        } else {
            acc.sell_volume += event.quantity;
        }
        acc.count += 1;
    }

    /// Merge two partial accumulators for the same symbol/window.
    ///
    /// Used after a parallel rescale or checkpoint recovery, never
    /// concurrently with an in-progress fold on either input. If
    /// exactly one side is uninitialized the other is returned
    /// unchanged.
    ///
    /// `open` comes from the side whose first event is earlier,
    /// `close` from the side whose last event is later; the left
    /// argument wins ties, which keeps the operation associative.
    pub fn merge(a: OhlcvAccumulator, b: OhlcvAccumulator) -> OhlcvAccumulator {
        if !a.initialized {
            return b;
        }
        if !b.initialized {
            return a;
        }

        debug!(
            count_a = a.count,
            count_b = b.count,
            "Merging partial accumulators"
        );

        let (open, first_event_time_ms) = if b.first_event_time_ms < a.first_event_time_ms {
            (b.open, b.first_event_time_ms)
        } else {
            (a.open, a.first_event_time_ms)
        };
        let (close, last_event_time_ms) = if b.last_event_time_ms > a.last_event_time_ms {
            (b.close, b.last_event_time_ms)
        } else {
            (a.close, a.last_event_time_ms)
        };

        OhlcvAccumulator {
            open,
            high: a.high.max(b.high),
            low: a.low.min(b.low),
            close,
            volume: a.volume + b.volume,
            price_volume_sum: a.price_volume_sum + b.price_volume_sum,
            buy_volume: a.buy_volume + b.buy_volume,
            sell_volume: a.sell_volume + b.sell_volume,
            count: a.count + b.count,
            initialized: true,
            first_event_time_ms,
            last_event_time_ms,
        }
    }

    /// Extract the final bar from a closed window's accumulator.
    ///
    /// Fails with [`AggregationError::NotInitialized`] if no event has
    /// been folded; never silently defaults.
    pub fn extract(acc: &OhlcvAccumulator) -> Result<OhlcvBar, AggregationError> {
        if !acc.initialized {
            return Err(AggregationError::NotInitialized);
        }

        let vwap = if acc.volume.is_zero() {
            Decimal::ZERO
        } else {
            acc.price_volume_sum / acc.volume
        };

        Ok(OhlcvBar {
            open: acc.open,
            high: acc.high,
            low: acc.low,
            close: acc.close,
            volume: acc.volume,
            vwap,
            buy_volume: acc.buy_volume,
            sell_volume: acc.sell_volume,
            count: acc.count,
        })
    }
}
