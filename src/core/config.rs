//! Game configuration.
//!
//! Hosts configure the engine at startup by providing a `GameConfig`:
//! - `pair_count`: how many pairs are dealt (10 pairs = 20 cards)
//! - `mismatch_delay_ms`: how long a wrong pair stays face up
//! - `seed`: optional RNG seed for reproducible deals
//!
//! The engine never hardcodes these values.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::GameError;

/// Default number of pairs per round.
pub const DEFAULT_PAIR_COUNT: usize = 10;

/// Default time a non-matching pair stays face up, in milliseconds.
pub const DEFAULT_MISMATCH_DELAY_MS: u64 = 1000;

/// Complete game configuration.
///
/// ```
/// use concentration::core::GameConfig;
///
/// let config = GameConfig::default()
///     .with_pair_count(6)
///     .with_mismatch_delay_ms(750)
///     .with_seed(42);
///
/// assert_eq!(config.card_count(), 12);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of pairs dealt per round.
    pub pair_count: usize,

    /// Time in milliseconds to leave a non-matching pair face up.
    pub mismatch_delay_ms: u64,

    /// RNG seed. `None` draws a seed from entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            pair_count: DEFAULT_PAIR_COUNT,
            mismatch_delay_ms: DEFAULT_MISMATCH_DELAY_MS,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of pairs.
    #[must_use]
    pub fn with_pair_count(mut self, pair_count: usize) -> Self {
        self.pair_count = pair_count;
        self
    }

    /// Set the mismatch display delay in milliseconds.
    #[must_use]
    pub fn with_mismatch_delay_ms(mut self, delay_ms: u64) -> Self {
        self.mismatch_delay_ms = delay_ms;
        self
    }

    /// Set a fixed RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Number of cards in a dealt deck.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.pair_count * 2
    }

    /// The mismatch delay as a `Duration`.
    #[must_use]
    pub fn mismatch_delay(&self) -> Duration {
        Duration::from_millis(self.mismatch_delay_ms)
    }

    /// Check the configuration can produce a playable round.
    pub fn validate(&self) -> Result<(), GameError> {
        if self.pair_count == 0 {
            return Err(GameError::InvalidConfig {
                reason: "pair_count must be at least 1".to_string(),
            });
        }
        let fits = self
            .pair_count
            .checked_mul(2)
            .is_some_and(|cards| u32::try_from(cards).is_ok());
        if !fits {
            return Err(GameError::InvalidConfig {
                reason: format!("pair_count {} is too large", self.pair_count),
            });
        }
        Ok(())
    }
}
