//! Mutable OHLCV aggregation state
//!
//! One accumulator exists per open (symbol, window) pair, exclusively
//! owned by the windowing engine that created it. The engine persists
//! the field state as opaque checkpoint data between calls, so every
//! field is a self-contained serializable value.
//!
//! Uses `Decimal` for all arithmetic so that sum invariants
//! (`volume == buy_volume + sell_volume`) hold exactly regardless of
//! fold order or merge shape.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Mutable aggregation state for one (symbol, window) pair.
///
/// An uninitialized accumulator has every numeric field at zero and
/// must never be queried for a result.
///
/// `first_event_time_ms` / `last_event_time_ms` are explicit ordering
/// tokens recorded at fold time. Merging two partial accumulators uses
/// them to decide which side contributes `open` and `close`; they are
/// the only ordering information retained from folded events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OhlcvAccumulator {
    /// Price of the first folded event.
    pub open: Decimal,
    /// Maximum folded price.
    pub high: Decimal,
    /// Minimum folded price.
    pub low: Decimal,
    /// Price of the most recently folded event.
    pub close: Decimal,
    /// Running sum of quantities.
    pub volume: Decimal,
    /// Running sum of price × quantity, for VWAP.
    pub price_volume_sum: Decimal,
    /// Quantity where the taker was the buyer.
    pub buy_volume: Decimal,
    /// Quantity where the taker was the seller.
    pub sell_volume: Decimal,
    /// Number of events folded in.
    pub count: u64,
    /// True once at least one event has been folded.
    pub initialized: bool,
    /// Event time of the first folded event (ordering token for merge).
    pub first_event_time_ms: i64,
    /// Event time of the last folded event (ordering token for merge).
    pub last_event_time_ms: i64,
}

impl OhlcvAccumulator {
    /// Validate accumulator integrity (OHLCV invariants).
    ///
    /// Trivially true for an uninitialized accumulator.
    pub fn is_valid(&self) -> bool {
        if !self.initialized {
            return self.count == 0 && self.volume.is_zero();
        }
        self.high >= self.open
            && self.high >= self.close
            && self.high >= self.low
            && self.low <= self.open
            && self.low <= self.close
            && self.volume >= Decimal::ZERO
            && self.volume == self.buy_volume + self.sell_volume
            && self.count > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_neutral() {
        let acc = OhlcvAccumulator::default();
        assert!(!acc.initialized);
        assert_eq!(acc.count, 0);
        assert_eq!(acc.volume, Decimal::ZERO);
        assert_eq!(acc.price_volume_sum, Decimal::ZERO);
        assert_eq!(acc.first_event_time_ms, 0);
        assert!(acc.is_valid());
    }

    #[test]
    fn test_checkpoint_serialization_round_trip() {
        let acc = OhlcvAccumulator {
            open: Decimal::from(100),
            high: Decimal::from(102),
            low: Decimal::from(99),
            close: Decimal::from(99),
            volume: Decimal::from(4),
            price_volume_sum: Decimal::from(403),
            buy_volume: Decimal::from(2),
            sell_volume: Decimal::from(2),
            count: 3,
            initialized: true,
            first_event_time_ms: 1_708_123_456_000,
            last_event_time_ms: 1_708_123_459_000,
        };

        let json = serde_json::to_string(&acc).unwrap();
        let restored: OhlcvAccumulator = serde_json::from_str(&json).unwrap();
        assert_eq!(acc, restored);
        assert!(restored.is_valid());
    }

    #[test]
    fn test_integrity_validation() {
        let invalid = OhlcvAccumulator {
            open: Decimal::from(100),
            high: Decimal::from(98), // high < open
            low: Decimal::from(97),
            close: Decimal::from(98),
            volume: Decimal::ONE,
            price_volume_sum: Decimal::from(98),
            buy_volume: Decimal::ONE,
            sell_volume: Decimal::ZERO,
            count: 1,
            initialized: true,
            first_event_time_ms: 1,
            last_event_time_ms: 1,
        };
        assert!(!invalid.is_valid());
    }

    #[test]
    fn test_volume_split_invariant_checked() {
        let acc = OhlcvAccumulator {
            open: Decimal::from(100),
            high: Decimal::from(100),
            low: Decimal::from(100),
            close: Decimal::from(100),
            volume: Decimal::from(3),
            price_volume_sum: Decimal::from(300),
            buy_volume: Decimal::ONE,
            sell_volume: Decimal::ONE, // 1 + 1 != 3
            count: 3,
            initialized: true,
            first_event_time_ms: 1,
            last_event_time_ms: 2,
        };
        assert!(!acc.is_valid());
    }
}
