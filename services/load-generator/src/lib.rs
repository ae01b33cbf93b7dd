//! Synthetic Trade Load Generator
//!
//! Produces a bounded-rate stream of synthetic trade events into a
//! message transport, one concurrent worker per traded symbol.
//!
//! # Architecture
//!
//! ```text
//! GeneratorSupervisor
//!        │ splits total rate, shares sequence source + sent counter
//!   ┌────┴────┬──────────┐
//! ┌─▼──────┐ ┌▼───────┐ ┌▼───────┐
//! │Worker  │ │Worker  │ │Worker  │   one per symbol
//! │ BTCUSDT│ │ ETHUSDT│ │ ...    │
//! └─┬──────┘ └┬───────┘ └┬───────┘
//!   │ PriceWalker → TradeEvent → RateScheduler pause
//!   └──────────┴──────────┴────► TradeSink (transport boundary)
//! ```
//!
//! Rate limiting is lag-compensating: a worker sleeps only when it is
//! ahead of its target schedule, so the long-run rate converges to the
//! target without drifting under OS sleep granularity.

pub mod config;
pub mod rate;
pub mod stats;
pub mod supervisor;
pub mod transport;
pub mod walker;
pub mod worker;

// Service version
pub const SERVICE_VERSION: &str = "0.1.0";
