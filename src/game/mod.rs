//! The game: state machine, commands and the mismatch timer.
//!
//! ## Key Types
//!
//! - [`ConcentrationGame`]: One session; owns the deck and processes commands
//! - [`GameState`]: The six states of a round
//! - [`Command`] / [`Outcome`]: Input events and what they did
//! - [`TimeoutScheduler`]: Host-provided timer; [`TimerQueue`] is a virtual clock
//!
//! Commands are applied one at a time through `&mut self`. A host with its
//! own event loop forwards clicks and timer callbacks as [`Command`]s; a
//! headless host uses [`TimerQueue`] and calls `advance`.

mod engine;
mod state;
mod timer;

pub use engine::ConcentrationGame;
pub use state::{Command, CommandKind, GameState, Ignored, Outcome, Score};
pub use timer::{TimeoutScheduler, TimeoutTicket, TimerQueue};
