//! Observable state for the presentation layer.

use serde::{Deserialize, Serialize};

use crate::cards::{CardIndex, FaceId, FaceState};

/// Background tint of a card.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tint {
    /// Gray: face down, or face up and unresolved.
    #[default]
    Neutral,
    /// Red: one of a wrong pair that is about to flip back.
    Mismatch,
    /// Green: part of a found pair.
    Matched,
    /// Red: revealed by solving without having been found.
    Unsolved,
}

impl Tint {
    /// Short lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Tint::Neutral => "neutral",
            Tint::Mismatch => "mismatch",
            Tint::Matched => "matched",
            Tint::Unsolved => "unsolved",
        }
    }
}

/// What a single card looks like right now.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardView {
    /// Display position.
    pub index: CardIndex,
    /// The revealed face, `None` while face down.
    pub face: Option<FaceId>,
    /// Visibility state.
    pub state: FaceState,
    /// Background tint.
    pub tint: Tint,
}

/// Text on the shuffle control.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShuffleLabel {
    /// During a round.
    #[default]
    Shuffle,
    /// Once the round is over.
    StartAgain,
}

impl ShuffleLabel {
    /// Button text.
    #[must_use]
    pub const fn text(self) -> &'static str {
        match self {
            ShuffleLabel::Shuffle => "Shuffle",
            ShuffleLabel::StartAgain => "Start Again",
        }
    }
}

/// State of the game controls. The shuffle control is always enabled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Controls {
    /// Can the solve control be used?
    pub solve_enabled: bool,
    /// Text on the shuffle control.
    pub shuffle_label: ShuffleLabel,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            solve_enabled: true,
            shuffle_label: ShuffleLabel::Shuffle,
        }
    }
}

impl Controls {
    /// Controls once a round has ended.
    #[must_use]
    pub const fn round_over() -> Self {
        Self {
            solve_enabled: false,
            shuffle_label: ShuffleLabel::StartAgain,
        }
    }
}
