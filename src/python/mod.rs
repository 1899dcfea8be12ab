//! Python bindings for the Concentration engine.
//!
//! # Quick Start
//!
//! ```python
//! import concentration
//!
//! game = concentration.ConcentrationGame(["ant.png", "bee.png"], pair_count=2, seed=7)
//! game.activate_card(0)
//! game.activate_card(1)
//! game.advance(1000)  # let a mismatch flip back
//! print(game.state, game.hits, game.misses)
//! ```
//!
//! The Python side owns the clock: call `advance` from the UI's timer.

use pyo3::prelude::*;

mod py_game;

pub use py_game::*;

/// concentration: a headless memory matching game.
#[pymodule]
fn concentration(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyConcentrationGame>()?;
    Ok(())
}
