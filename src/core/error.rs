//! Errors that abort an operation.
//!
//! Only deck generation and configuration can fail. Commands that simply
//! have no effect (clicking a face-up card, a stale timeout) are not errors;
//! see [`crate::game::Ignored`].

use serde::{Deserialize, Serialize};

/// A fatal error for the requested operation.
///
/// When one is returned, the game is left exactly as it was before the call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameError {
    /// The catalog holds fewer distinct faces than the pairs requested.
    InsufficientFaceCatalog { required: usize, available: usize },

    /// The configuration cannot produce a playable round.
    InvalidConfig { reason: String },
}

impl std::fmt::Display for GameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameError::InsufficientFaceCatalog { required, available } => write!(
                f,
                "face catalog has {} distinct faces but {} pairs are required",
                available, required
            ),
            GameError::InvalidConfig { reason } => write!(f, "invalid configuration: {}", reason),
        }
    }
}

impl std::error::Error for GameError {}
