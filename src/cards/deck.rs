//! The deck: every card in the current round, in display order.
//!
//! ## Dealing
//!
//! 1. Sample `pair_count` distinct faces from the catalog
//! 2. Lay each face down twice
//! 3. Shuffle the layout (Fisher-Yates)
//! 4. Link each card to the other card with the same face
//!
//! Partners are resolved after the shuffle, so a `CardIndex` always names a
//! display position.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::card::{Card, CardIndex, FaceState};
use super::face::{FaceCatalog, FaceId};
use crate::core::{GameError, GameRng};

/// All cards of one round.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Deal a fresh deck of `pair_count` pairs from `catalog`.
    ///
    /// Fails without consuming randomness if the catalog is too small or
    /// `pair_count` is zero.
    pub fn deal(
        catalog: &FaceCatalog,
        pair_count: usize,
        rng: &mut GameRng,
    ) -> Result<Self, GameError> {
        if pair_count == 0 {
            return Err(GameError::InvalidConfig {
                reason: "pair_count must be at least 1".to_string(),
            });
        }
        let fits = pair_count
            .checked_mul(2)
            .is_some_and(|cards| u32::try_from(cards).is_ok());
        if !fits {
            return Err(GameError::InvalidConfig {
                reason: format!("pair_count {} is too large", pair_count),
            });
        }
        if catalog.len() < pair_count {
            return Err(GameError::InsufficientFaceCatalog {
                required: pair_count,
                available: catalog.len(),
            });
        }

        let picked = rng
            .sample_distinct(catalog.len(), pair_count)
            .ok_or(GameError::InsufficientFaceCatalog {
                required: pair_count,
                available: catalog.len(),
            })?;

        let mut layout: Vec<FaceId> = Vec::with_capacity(pair_count * 2);
        for i in picked {
            let face = u32::try_from(i)
                .map(FaceId::new)
                .map_err(|_| GameError::InvalidConfig {
                    reason: format!("face index {} is out of range", i),
                })?;
            layout.extend([face, face]);
        }
        rng.shuffle(&mut layout);

        let deck = Self::from_layout(&layout);
        debug!(pairs = pair_count, cards = deck.len(), "dealt deck");
        Ok(deck)
    }

    /// Build a face-down deck from a display layout.
    ///
    /// Every face in `layout` must appear exactly twice, and `layout`
    /// holds at most `u32::MAX` cards.
    fn from_layout(layout: &[FaceId]) -> Self {
        let mut first_seen: FxHashMap<FaceId, CardIndex> = FxHashMap::default();
        let mut partners = vec![CardIndex::default(); layout.len()];

        for (position, face) in (0u32..).map(CardIndex::new).zip(layout) {
            match first_seen.remove(face) {
                Some(first) => {
                    partners[first.get()] = position;
                    partners[position.get()] = first;
                }
                None => {
                    first_seen.insert(*face, position);
                }
            }
        }
        debug_assert!(first_seen.is_empty(), "every face must appear twice");

        let cards = layout
            .iter()
            .zip(partners)
            .map(|(&face, partner)| Card::new(face, partner))
            .collect();
        Self { cards }
    }

    /// Number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the deck has no cards.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Number of pairs dealt.
    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.cards.len() / 2
    }

    /// Get a card by position.
    #[must_use]
    pub fn get(&self, index: CardIndex) -> Option<&Card> {
        self.cards.get(index.get())
    }

    pub(crate) fn get_mut(&mut self, index: CardIndex) -> Option<&mut Card> {
        self.cards.get_mut(index.get())
    }

    /// Iterate over `(CardIndex, &Card)` in display order.
    pub fn iter(&self) -> impl Iterator<Item = (CardIndex, &Card)> {
        (0u32..).map(CardIndex::new).zip(self.cards.iter())
    }

    /// All cards as a slice, in display order.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Positions of cards in a given state.
    pub fn indices_in_state(&self, state: FaceState) -> impl Iterator<Item = CardIndex> + '_ {
        self.iter()
            .filter(move |(_, c)| c.state() == state)
            .map(|(i, _)| i)
    }

    /// Number of matched cards.
    #[must_use]
    pub fn matched_count(&self) -> usize {
        self.cards.iter().filter(|c| c.is_matched()).count()
    }

    /// Do `a` and `b` form a pair?
    ///
    /// Compares partner links, not faces.
    #[must_use]
    pub fn are_partners(&self, a: CardIndex, b: CardIndex) -> bool {
        a != b && self.get(a).is_some_and(|card| card.partner() == b)
    }

    /// Verify the pairing invariant: every face appears on exactly two
    /// cards and those two cards name each other as partners.
    #[must_use]
    pub fn is_well_paired(&self) -> bool {
        let mut counts: FxHashMap<FaceId, usize> = FxHashMap::default();
        for card in &self.cards {
            *counts.entry(card.face()).or_insert(0) += 1;
        }
        if counts.values().any(|&n| n != 2) {
            return false;
        }

        self.iter().all(|(index, card)| {
            self.get(card.partner()).is_some_and(|partner| {
                card.partner() != index
                    && partner.partner() == index
                    && partner.face() == card.face()
            })
        })
    }
}
