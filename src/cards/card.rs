//! Cards - a single flippable unit in the deck.
//!
//! A `Card` shows one face and knows which other card in the deck is its
//! partner. Partners are linked by deck position (`CardIndex`), never by
//! reference, so the deck owns every card outright.
//!
//! ## States
//!
//! ```text
//! FaceDown --flip_up--> FaceUp --flip_down--> FaceDown
//!     \                   |
//!      \--mark_matched--> Matched (terminal)
//! ```

use serde::{Deserialize, Serialize};

use super::face::FaceId;

/// Position of a card in the deck (display order).
///
/// Valid for the lifetime of one deal; a shuffle invalidates all indices.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardIndex(pub u32);

impl CardIndex {
    /// Create a new card index.
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Get the index as usize for slice access.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0 as usize
    }
}

impl TryFrom<usize> for CardIndex {
    type Error = std::num::TryFromIntError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        u32::try_from(index).map(Self)
    }
}

impl std::fmt::Display for CardIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card#{}", self.0)
    }
}

/// Visibility state of a card.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FaceState {
    /// Graphic hidden. Every card starts here.
    #[default]
    FaceDown,
    /// Graphic shown, not yet resolved.
    FaceUp,
    /// Part of a found pair. Never changes again.
    Matched,
}

impl FaceState {
    /// Whether the face graphic is visible in this state.
    #[must_use]
    pub const fn is_revealed(self) -> bool {
        !matches!(self, FaceState::FaceDown)
    }

    /// Short lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            FaceState::FaceDown => "face_down",
            FaceState::FaceUp => "face_up",
            FaceState::Matched => "matched",
        }
    }
}

/// A card in the deck.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    face: FaceId,
    state: FaceState,
    partner: CardIndex,
}

impl Card {
    /// Create a face-down card linked to `partner`.
    #[must_use]
    pub fn new(face: FaceId, partner: CardIndex) -> Self {
        Self {
            face,
            state: FaceState::FaceDown,
            partner,
        }
    }

    /// The face this card reveals.
    #[must_use]
    pub fn face(&self) -> FaceId {
        self.face
    }

    /// Current visibility state.
    #[must_use]
    pub fn state(&self) -> FaceState {
        self.state
    }

    /// Position of the partner card in the deck.
    #[must_use]
    pub fn partner(&self) -> CardIndex {
        self.partner
    }

    /// Is the card face up (and not yet matched)?
    #[must_use]
    pub fn is_face_up(&self) -> bool {
        self.state == FaceState::FaceUp
    }

    /// Has the card been matched?
    #[must_use]
    pub fn is_matched(&self) -> bool {
        self.state == FaceState::Matched
    }

    /// Turn the card face up.
    ///
    /// Returns true only if the card went from FaceDown to FaceUp. Face-up
    /// and matched cards are left alone, which is how repeated clicks on the
    /// same card are ignored.
    pub fn flip_up(&mut self) -> bool {
        if self.state == FaceState::FaceDown {
            self.state = FaceState::FaceUp;
            true
        } else {
            false
        }
    }

    /// Turn the card face down.
    ///
    /// Returns true only if the card went from FaceUp to FaceDown.
    pub fn flip_down(&mut self) -> bool {
        if self.state == FaceState::FaceUp {
            self.state = FaceState::FaceDown;
            true
        } else {
            false
        }
    }

    /// Mark the card as part of a found pair. Idempotent.
    pub fn mark_matched(&mut self) {
        self.state = FaceState::Matched;
    }
}
