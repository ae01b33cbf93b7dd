//! Per-symbol stochastic price process
//!
//! Gaussian random walk over an unbounded tick sequence. The internal
//! unrounded `f64` price drives each next step; only the returned
//! price is rounded to the wire precision. Deterministic under a fixed
//! RNG seed.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::StandardNormal;
use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Wire precision for prices (decimal places).
pub const PRICE_DP: u32 = 2;

/// Wire precision for quantities (decimal places).
pub const QUANTITY_DP: u32 = 4;

/// Configuration for the price walker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalkerConfig {
    /// Relative standard deviation of one step, as a fraction of the
    /// current price (0.0003 = ±0.03% per tick).
    pub step_sigma: f64,
    /// Strictly positive price floor.
    pub min_price: f64,
    /// Minimum quantity per trade.
    pub min_quantity: f64,
    /// Maximum quantity per trade.
    pub max_quantity: f64,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            step_sigma: 0.0003,
            min_price: 0.01,
            min_quantity: 0.001,
            max_quantity: 0.5,
        }
    }
}

/// Per-symbol stochastic price/quantity generator.
///
/// Stateful only in its current price; restartable by re-seeding.
pub struct PriceWalker {
    price: f64,
    config: WalkerConfig,
    rng: ChaCha8Rng,
}

impl PriceWalker {
    /// Create a walker starting at `seed_price` with a deterministic
    /// RNG seed.
    ///
    /// Degenerate config values are normalized rather than rejected:
    /// inverted quantity bounds are swapped and a non-positive price
    /// floor falls back to the default.
    pub fn new(seed_price: Decimal, mut config: WalkerConfig, rng_seed: u64) -> Self {
        if config.min_quantity > config.max_quantity {
            std::mem::swap(&mut config.min_quantity, &mut config.max_quantity);
        }
        if config.min_price <= 0.0 {
            config.min_price = WalkerConfig::default().min_price;
        }
        let price = seed_price
            .to_f64()
            .filter(|p| *p > 0.0)
            .unwrap_or(100.0);
        Self {
            price,
            config,
            rng: ChaCha8Rng::seed_from_u64(rng_seed),
        }
    }

    /// Advance the walk and return the next (price, quantity).
    ///
    /// Price is rounded to 2 decimal places, quantity to 4; the
    /// unrounded price remains the state for the next step.
    pub fn next(&mut self) -> (Decimal, Decimal) {
        // sigma is applied relative to the current price per step
        let z: f64 = self.rng.sample(StandardNormal);
        self.price =
            (self.price + self.price * z * self.config.step_sigma).max(self.config.min_price);

        let quantity_f: f64 = self
            .rng
            .gen_range(self.config.min_quantity..=self.config.max_quantity);

        let price = Decimal::from_f64(self.price)
            .map(|p| p.round_dp(PRICE_DP))
            .filter(|p| *p > Decimal::ZERO)
            .unwrap_or_else(|| Decimal::new(1, PRICE_DP));
        let quantity = Decimal::from_f64(quantity_f)
            .map(|q| q.round_dp(QUANTITY_DP))
            .filter(|q| *q > Decimal::ZERO)
            .unwrap_or_else(|| Decimal::new(1, QUANTITY_DP));

        (price, quantity)
    }

    /// Current unrounded internal price.
    pub fn current_price(&self) -> f64 {
        self.price
    }
}
