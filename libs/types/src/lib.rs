//! Types library for the trade load-generation pipeline
//!
//! Provides the core type definitions shared between the synthetic
//! trade generator and the OHLCV aggregation layer.
//!
//! # Modules
//! - `symbol`: Traded symbol identifier
//! - `event`: Trade event and wire encoding
//! - `errors`: Error taxonomy

pub mod errors;
pub mod event;
pub mod symbol;

// Library version constant
pub const LIB_VERSION: &str = "0.1.0";

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::errors::*;
    pub use crate::event::*;
    pub use crate::symbol::*;
}
