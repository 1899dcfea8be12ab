//! Render sink and observable state.
//!
//! The engine never draws. After every card mutation, score change, control
//! change and state transition it emits a [`RenderEvent`] to the host's
//! [`RenderSink`]; the host redraws however it likes.
//!
//! ## Key Types
//!
//! - [`RenderSink`]: Receives events (closures, [`NullSink`], [`RecordingSink`])
//! - [`RenderEvent`]: One observable change
//! - [`CardView`] / [`Tint`]: How a single card looks
//! - [`Controls`] / [`ShuffleLabel`]: Solve and shuffle control state
//! - [`GameSnapshot`]: Everything at once, serializable

mod sink;
mod snapshot;
mod view;

pub use sink::{NullSink, RecordingSink, RenderEvent, RenderSink};
pub use snapshot::{CardSnapshot, GameSnapshot};
pub use view::{CardView, Controls, ShuffleLabel, Tint};
