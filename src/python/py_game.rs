//! Game bindings for Python.

use std::time::Duration;

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::cards::{CardIndex, FaceCatalog};
use crate::core::{GameConfig, GameError};
use crate::game::ConcentrationGame;

fn to_py_err(err: GameError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

/// Python wrapper for ConcentrationGame.
///
/// Headless: no render callbacks. Read the getters after each call.
#[pyclass(name = "ConcentrationGame")]
pub struct PyConcentrationGame {
    game: ConcentrationGame,
}

#[pymethods]
impl PyConcentrationGame {
    /// Create a game and deal the first deck.
    ///
    /// # Arguments
    /// - faces: Face names, e.g. image file names. Duplicates are dropped.
    /// - pair_count: Number of pairs on the board
    /// - mismatch_delay_ms: How long a wrong pair stays up
    /// - seed: RNG seed; None draws one from entropy
    ///
    /// Raises ValueError if there are fewer distinct faces than pairs.
    #[new]
    #[pyo3(signature = (faces, pair_count = 10, mismatch_delay_ms = 1000, seed = None))]
    fn new(
        faces: Vec<String>,
        pair_count: usize,
        mismatch_delay_ms: u64,
        seed: Option<u64>,
    ) -> PyResult<Self> {
        let mut config = GameConfig::new()
            .with_pair_count(pair_count)
            .with_mismatch_delay_ms(mismatch_delay_ms);
        config.seed = seed;

        let game = ConcentrationGame::headless(config, FaceCatalog::new(faces)).map_err(to_py_err)?;
        Ok(Self { game })
    }

    /// Click a card. Returns True if anything changed.
    fn activate_card(&mut self, index: u32) -> bool {
        self.game.on_card_activated(CardIndex::new(index)).is_applied()
    }

    /// Deal a new deck and reset the score.
    fn shuffle(&mut self) -> PyResult<()> {
        self.game.on_shuffle_requested().map_err(to_py_err)?;
        Ok(())
    }

    /// Reveal the board. Returns False if solving is not allowed now.
    fn solve(&mut self) -> bool {
        self.game.on_solve_requested().is_applied()
    }

    /// Advance the game clock. Returns how many timeouts fired.
    fn advance(&mut self, elapsed_ms: u64) -> usize {
        self.game.advance(Duration::from_millis(elapsed_ms))
    }

    /// Current state name, e.g. "waiting_for_first_card".
    #[getter]
    fn state(&self) -> &'static str {
        self.game.state().as_str()
    }

    /// Pairs found this round.
    #[getter]
    fn hits(&self) -> u32 {
        self.game.score().hits
    }

    /// Wrong pairs turned up this round.
    #[getter]
    fn misses(&self) -> u32 {
        self.game.score().misses
    }

    /// Number of pairs on the board.
    #[getter]
    fn pair_count(&self) -> usize {
        self.game.deck().pair_count()
    }

    /// Number of cards on the board (twice the pair count).
    #[getter]
    fn card_count(&self) -> usize {
        self.game.deck().len()
    }

    /// Seed of the deal RNG. Pass it as `seed` to replay this game's deals.
    #[getter]
    fn seed(&self) -> u64 {
        self.game.seed()
    }

    /// Can the solve button be used?
    #[getter]
    fn solve_enabled(&self) -> bool {
        self.game.controls().solve_enabled
    }

    /// "Shuffle" during a round, "Start Again" once it is over.
    #[getter]
    fn shuffle_label(&self) -> &'static str {
        self.game.controls().shuffle_label.text()
    }

    /// Is a mismatch timeout pending?
    #[getter]
    fn timeout_pending(&self) -> bool {
        self.game.pending_timeout().is_some()
    }

    /// "face_down", "face_up" or "matched" for every card.
    fn card_states(&self) -> Vec<&'static str> {
        self.game.deck().cards().iter().map(|c| c.state().as_str()).collect()
    }

    /// Tint name for every card.
    fn card_tints(&self) -> Vec<&'static str> {
        self.game.card_views().map(|v| v.tint.as_str()).collect()
    }

    /// Face label of every card, None while face down.
    fn face_labels(&self) -> Vec<Option<String>> {
        self.game
            .deck()
            .iter()
            .map(|(index, _)| self.game.revealed_face(index).map(|f| f.label().to_string()))
            .collect()
    }

    fn __repr__(&self) -> String {
        let score = self.game.score();
        format!(
            "ConcentrationGame(state={}, hits={}, misses={}, cards={})",
            self.game.state(),
            score.hits,
            score.misses,
            self.game.deck().len()
        )
    }
}
