//! Traded symbol identifier
//!
//! Symbols are flat uppercase pair names as used on the trade wire
//! format (e.g. "BTCUSDT", "ETHUSDT"). A symbol is also the partition
//! key at the transport boundary, so per-symbol ordering is preserved
//! end to end.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Traded symbol (trading pair) identifier.
///
/// Non-empty, stored uppercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    /// Create a new Symbol from a string.
    ///
    /// # Panics
    /// Panics if the string is empty or blank.
    pub fn new(symbol: impl Into<String>) -> Self {
        let s = symbol.into();
        assert!(!s.trim().is_empty(), "Symbol must be non-empty");
        Self(s.trim().to_uppercase())
    }

    /// Try to create a Symbol, returning None if blank.
    pub fn try_new(symbol: impl Into<String>) -> Option<Self> {
        let s = symbol.into();
        if s.trim().is_empty() {
            None
        } else {
            Some(Self(s.trim().to_uppercase()))
        }
    }

    /// Get the symbol string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_creation() {
        let symbol = Symbol::new("BTCUSDT");
        assert_eq!(symbol.as_str(), "BTCUSDT");
    }

    #[test]
    fn test_symbol_uppercased_and_trimmed() {
        let symbol = Symbol::new(" ethusdt ");
        assert_eq!(symbol.as_str(), "ETHUSDT");
    }

    #[test]
    fn test_symbol_try_new() {
        assert!(Symbol::try_new("SOLUSDT").is_some());
        assert!(Symbol::try_new("   ").is_none());
        assert!(Symbol::try_new("").is_none());
    }

    #[test]
    #[should_panic(expected = "Symbol must be non-empty")]
    fn test_symbol_empty_rejected() {
        Symbol::new("");
    }

    #[test]
    fn test_symbol_serialization() {
        let symbol = Symbol::new("BNBUSDT");
        let json = serde_json::to_string(&symbol).unwrap();
        assert_eq!(json, "\"BNBUSDT\"");

        let deserialized: Symbol = serde_json::from_str(&json).unwrap();
        assert_eq!(symbol, deserialized);
    }
}
