//! A full copy of the observable game state.
//!
//! Hosts that redraw everything each frame (or cross a process boundary)
//! can take a `GameSnapshot` instead of following `RenderEvent`s.

use serde::{Deserialize, Serialize};

use super::view::{CardView, Controls, Tint};
use crate::cards::{CardIndex, FaceState};
use crate::game::{GameState, Score};

/// One card as seen by the player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardSnapshot {
    pub index: CardIndex,
    pub state: FaceState,
    pub tint: Tint,
    /// Face name, present only while revealed.
    pub face: Option<String>,
    /// Face label (name without extension), present only while revealed.
    pub label: Option<String>,
}

/// Everything the presentation layer can show.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub state: GameState,
    pub score: Score,
    pub controls: Controls,
    pub pair_count: usize,
    /// Seed of the deal RNG; replays the round's deals.
    pub seed: u64,
    pub cards: Vec<CardSnapshot>,
    /// Is a mismatch timeout pending?
    pub timeout_pending: bool,
}

impl GameSnapshot {
    /// Is the round over?
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    /// Cards currently showing their face.
    pub fn revealed(&self) -> impl Iterator<Item = &CardSnapshot> {
        self.cards.iter().filter(|c| c.state.is_revealed())
    }
}

impl CardSnapshot {
    pub(crate) fn from_view(view: CardView, name: Option<&str>, label: Option<&str>) -> Self {
        Self {
            index: view.index,
            state: view.state,
            tint: view.tint,
            face: name.map(str::to_string),
            label: label.map(str::to_string),
        }
    }
}
