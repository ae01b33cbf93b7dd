//! Trade event and wire encoding
//!
//! A `TradeEvent` describes one synthetic trade. It is constructed by a
//! symbol worker immediately before publication and never mutated
//! afterward.
//!
//! The wire encoding uses the short exchange-style field keys
//! (`s`, `p`, `q`, `T`, `m`, ...) so downstream consumers see the same
//! schema as a real trade feed. Encoding is lossless: decoding an
//! encoded event yields an equal value.

use crate::errors::EventError;
use crate::symbol::Symbol;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Source tag stamped on every synthetic event.
pub const EVENT_SOURCE: &str = "LOADGEN";

/// Immutable description of one synthetic trade.
///
/// `is_buyer_maker` follows the exchange convention: true means the
/// maker was the buyer, i.e. the taker (aggressor) was the seller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeEvent {
    /// Event type discriminator, always "trade".
    #[serde(rename = "e")]
    pub event_type: String,
    /// Event time in Unix milliseconds.
    #[serde(rename = "E")]
    pub event_time_ms: i64,
    /// Traded symbol, also the transport partition key.
    #[serde(rename = "s")]
    pub symbol: Symbol,
    /// Globally unique, monotonically increasing sequence id.
    #[serde(rename = "t")]
    pub sequence_id: u64,
    /// Trade price, positive, 2 decimal places.
    #[serde(rename = "p")]
    pub price: Decimal,
    /// Trade quantity, positive, 4 decimal places.
    #[serde(rename = "q")]
    pub quantity: Decimal,
    /// Trade execution time in Unix milliseconds.
    #[serde(rename = "T")]
    pub trade_time_ms: i64,
    /// True if the maker was the buyer (taker was the seller).
    #[serde(rename = "m")]
    pub is_buyer_maker: bool,
    /// Origin tag, always [`EVENT_SOURCE`] for generated events.
    pub source: String,
    /// Time the event entered the pipeline, Unix milliseconds.
    #[serde(rename = "ingestionTimeMs")]
    pub ingest_time_ms: i64,
    /// Ingest latency; always 0 for synthetic events.
    #[serde(rename = "latencyMs")]
    pub latency_ms: i64,
}

impl TradeEvent {
    /// Create a new trade event with all timestamps set to `now_ms`.
    pub fn new(
        symbol: Symbol,
        price: Decimal,
        quantity: Decimal,
        is_buyer_maker: bool,
        sequence_id: u64,
        now_ms: i64,
    ) -> Self {
        Self {
            event_type: "trade".to_string(),
            event_time_ms: now_ms,
            symbol,
            sequence_id,
            price,
            quantity,
            trade_time_ms: now_ms,
            is_buyer_maker,
            source: EVENT_SOURCE.to_string(),
            ingest_time_ms: now_ms,
            latency_ms: 0,
        }
    }

    /// True if the taker (aggressor) was the buyer.
    pub fn taker_is_buyer(&self) -> bool {
        !self.is_buyer_maker
    }

    /// Partition key at the transport boundary.
    pub fn partition_key(&self) -> &str {
        self.symbol.as_str()
    }

    /// Validate event field invariants.
    pub fn is_valid(&self) -> bool {
        self.price > Decimal::ZERO
            && self.quantity > Decimal::ZERO
            && self.event_time_ms > 0
            && self.ingest_time_ms > 0
    }

    /// Encode to the wire payload.
    pub fn to_payload(&self) -> Result<Vec<u8>, EventError> {
        serde_json::to_vec(self).map_err(|e| EventError::Encode(e.to_string()))
    }

    /// Decode from a wire payload.
    pub fn from_payload(bytes: &[u8]) -> Result<Self, EventError> {
        serde_json::from_slice(bytes).map_err(|e| EventError::Decode(e.to_string()))
    }
}
