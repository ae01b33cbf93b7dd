//! Generator configuration
//!
//! Loaded from environment variables:
//!
//! - `LOAD_SYMBOLS` — comma-separated symbol list
//!   (default `BTCUSDT,ETHUSDT,SOLUSDT,BNBUSDT`)
//! - `LOAD_TRADES_PER_SECOND` — total target rate across all workers
//!   (default `10000`)
//!
//! An invalid configuration (no symbols, non-positive rate) is fatal
//! at startup: the supervisor refuses to spawn any worker.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use types::errors::ConfigError;
use types::symbol::Symbol;

/// Default symbol set.
pub const DEFAULT_SYMBOLS: &str = "BTCUSDT,ETHUSDT,SOLUSDT,BNBUSDT";

/// Default total trades per second across all workers.
pub const DEFAULT_TOTAL_RATE: u64 = 10_000;

/// Base price for symbols not present in the seed table.
pub const FALLBACK_SEED_PRICE: u64 = 100;

/// Seed prices for the default symbol set.
fn default_seed_prices() -> BTreeMap<Symbol, Decimal> {
    BTreeMap::from([
        (Symbol::new("BTCUSDT"), Decimal::from(85_000)),
        (Symbol::new("ETHUSDT"), Decimal::from(3_200)),
        (Symbol::new("SOLUSDT"), Decimal::from(140)),
        (Symbol::new("BNBUSDT"), Decimal::from(580)),
    ])
}

/// Configuration for the generator supervisor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Symbols to generate, one worker each.
    pub symbols: Vec<Symbol>,
    /// Total target rate in events/sec, split evenly across workers.
    pub total_rate: u64,
    /// Base price per symbol; unknown symbols fall back to 100.
    pub seed_prices: BTreeMap<Symbol, Decimal>,
    /// Fixed RNG seed for deterministic runs; None seeds from the clock.
    pub rng_seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            symbols: DEFAULT_SYMBOLS.split(',').map(Symbol::new).collect(),
            total_rate: DEFAULT_TOTAL_RATE,
            seed_prices: default_seed_prices(),
            rng_seed: None,
        }
    }
}

impl GeneratorConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(raw) = std::env::var("LOAD_SYMBOLS") {
            config.symbols = raw.split(',').filter_map(Symbol::try_new).collect();
        }

        if let Ok(raw) = std::env::var("LOAD_TRADES_PER_SECOND") {
            config.total_rate =
                raw.trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidEnvValue {
                        key: "LOAD_TRADES_PER_SECOND".to_string(),
                        value: raw.clone(),
                    })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration. Nothing may start when this fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.symbols.is_empty() {
            return Err(ConfigError::NoSymbols);
        }
        if self.total_rate == 0 {
            return Err(ConfigError::InvalidRate {
                rate: self.total_rate as i64,
            });
        }
        Ok(())
    }

    /// Per-worker target rate: even split with a floor of 1 event/sec.
    pub fn per_worker_rate(&self) -> u64 {
        (self.total_rate / self.symbols.len().max(1) as u64).max(1)
    }

    /// Base price for a symbol, falling back to 100 when unknown.
    pub fn seed_price(&self, symbol: &Symbol) -> Decimal {
        self.seed_prices
            .get(symbol)
            .copied()
            .unwrap_or_else(|| Decimal::from(FALLBACK_SEED_PRICE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        let config = GeneratorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.symbols.len(), 4);
        assert_eq!(config.total_rate, 10_000);
    }

    #[test]
    fn test_no_symbols_rejected() {
        let config = GeneratorConfig {
            symbols: Vec::new(),
            ..GeneratorConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::NoSymbols));
    }

    #[test]
    fn test_zero_rate_rejected() {
        let config = GeneratorConfig {
            total_rate: 0,
            ..GeneratorConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidRate { rate: 0 }));
    }

    #[test]
    fn test_per_worker_rate_split() {
        let config = GeneratorConfig {
            symbols: vec![Symbol::new("BTCUSDT"), Symbol::new("ETHUSDT")],
            total_rate: 100,
            ..GeneratorConfig::default()
        };
        assert_eq!(config.per_worker_rate(), 50);
    }

    #[test]
    fn test_per_worker_rate_floor() {
        let config = GeneratorConfig {
            symbols: vec![
                Symbol::new("BTCUSDT"),
                Symbol::new("ETHUSDT"),
                Symbol::new("SOLUSDT"),
            ],
            total_rate: 2,
            ..GeneratorConfig::default()
        };
        assert_eq!(config.per_worker_rate(), 1);
    }

    #[test]
    fn test_seed_price_table() {
        let config = GeneratorConfig::default();
        assert_eq!(
            config.seed_price(&Symbol::new("BTCUSDT")),
            Decimal::from(85_000)
        );
        assert_eq!(
            config.seed_price(&Symbol::new("DOGEUSDT")),
            Decimal::from(100)
        );
    }
}
