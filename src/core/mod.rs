//! Core engine types: configuration, RNG, errors.
//!
//! These are the building blocks shared by the card and game layers.
//! Hosts configure the engine via `GameConfig` rather than modifying it.

pub mod config;
pub mod error;
pub mod rng;

pub use config::{GameConfig, DEFAULT_MISMATCH_DELAY_MS, DEFAULT_PAIR_COUNT};
pub use error::GameError;
pub use rng::{GameRng, GameRngState};
