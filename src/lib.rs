//! # concentration
//!
//! A headless engine for Concentration, the memory matching card game.
//!
//! A deck of face-down cards holds every face exactly twice. The player turns
//! up two cards at a time: a matching pair stays up, a wrong pair is shown
//! briefly and then turned back down. The round ends when every pair is
//! found or the player asks for the solution.
//!
//! ## Design Principles
//!
//! 1. **Headless**: The engine never draws or sleeps. Output goes to a
//!    [`RenderSink`](render::RenderSink); the mismatch delay goes through a
//!    [`TimeoutScheduler`](game::TimeoutScheduler) the host provides.
//!
//! 2. **Deterministic**: All randomness comes from a seeded ChaCha8 RNG.
//!    The same seed deals the same decks.
//!
//! 3. **No stale timers**: Every scheduled timeout carries a ticket. A
//!    ticket that is no longer pending is discarded when it fires.
//!
//! ## Modules
//!
//! - `core`: Configuration, RNG, errors
//! - `cards`: Faces, cards, deck generation
//! - `game`: The state machine, commands, timer
//! - `render`: Render events, card views, snapshots

pub mod cards;
pub mod core;
pub mod game;
pub mod render;

#[cfg(feature = "python")]
mod python;

// Re-export commonly used types
pub use crate::core::{GameConfig, GameError, GameRng, GameRngState};

pub use crate::cards::{Card, CardIndex, Deck, Face, FaceCatalog, FaceId, FaceState};

pub use crate::game::{
    Command, CommandKind, ConcentrationGame, GameState, Ignored, Outcome, Score,
    TimeoutScheduler, TimeoutTicket, TimerQueue,
};

pub use crate::render::{
    CardSnapshot, CardView, Controls, GameSnapshot, NullSink, RecordingSink, RenderEvent,
    RenderSink, ShuffleLabel, Tint,
};
