//! Error taxonomy for the load-generation pipeline
//!
//! Comprehensive error types using thiserror. Per-event transport
//! failures are recoverable by policy: workers log and continue.
//! Configuration errors are fatal at startup and prevent any worker
//! from spawning.

use thiserror::Error;

/// Startup configuration errors. Fatal: nothing starts when one occurs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("no symbols configured")]
    NoSymbols,

    #[error("invalid target rate: {rate} (must be positive)")]
    InvalidRate { rate: i64 },

    #[error("invalid value for {key}: {value}")]
    InvalidEnvValue { key: String, value: String },
}

/// Per-event transport failures surfaced by the publish boundary.
///
/// Never fatal to a worker: the event is dropped and generation
/// continues.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("publish failed: {reason}")]
    PublishFailed { reason: String },

    #[error("transport closed")]
    Closed,
}

/// Event encoding/decoding errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EventError {
    #[error("encode failed: {0}")]
    Encode(String),

    #[error("decode failed: {0}")]
    Decode(String),
}

/// Aggregation algebra errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AggregationError {
    /// Result extraction was attempted on an accumulator that has never
    /// folded an event. Usage error; must surface to the caller.
    #[error("accumulator not initialized: no events folded")]
    NotInitialized,
}
