//! Card system: faces, cards, and the deck.
//!
//! ## Key Types
//!
//! - `FaceId` / `Face`: The graphic a card reveals
//! - `FaceCatalog`: The faces available for dealing
//! - `CardIndex`: A card's display position
//! - `Card`: Runtime card state (face, visibility, partner link)
//! - `Deck`: Every card of the round, plus dealing

pub mod card;
pub mod deck;
pub mod face;

pub use card::{Card, CardIndex, FaceState};
pub use deck::Deck;
pub use face::{Face, FaceCatalog, FaceId};
