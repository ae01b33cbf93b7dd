//! OHLCV Aggregation
//!
//! State representation and update algebra for incrementally folding
//! trade events into OHLCV (open/high/low/close/volume) candle bars
//! inside a fault-tolerant streaming pipeline.
//!
//! The enclosing windowing engine owns one [`OhlcvAccumulator`] per
//! (symbol, window) pair and drives it through the stateless
//! [`OhlcvAggregator`] algebra:
//!
//! ```text
//! initialize ──► fold(event)* ──► extract ──► OhlcvBar
//!                    │
//!                    └── merge(other partial) — parallel rescale
//!                                               or checkpoint recovery
//! ```
//!
//! The accumulator is a plain serde value type with no embedded
//! references, so checkpointing its field state byte-for-byte fully
//! reproduces it.

pub mod accumulator;
pub mod aggregator;

pub use accumulator::OhlcvAccumulator;
pub use aggregator::{OhlcvAggregator, OhlcvBar};

// Library version
pub const SERVICE_VERSION: &str = "0.1.0";
