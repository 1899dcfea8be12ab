//! The render sink: how the engine tells the presentation layer to redraw.

use serde::{Deserialize, Serialize};

use super::view::{CardView, Controls};
use crate::game::{GameState, Score};

/// One observable change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RenderEvent {
    /// A new deck replaced the old one. Every card is face down; lay the
    /// board out again for `card_count` cards.
    DeckDealt { card_count: usize },
    /// A card changed visibility or tint.
    CardChanged { view: CardView },
    /// The hit or miss counter changed.
    ScoreChanged { score: Score },
    /// Control state changed.
    ControlsChanged { controls: Controls },
    /// The game moved between states.
    StateChanged { from: GameState, to: GameState },
}

/// Receives render events, synchronously, after each mutation.
///
/// Implemented for any `FnMut(&RenderEvent)` closure:
///
/// ```
/// use concentration::cards::FaceCatalog;
/// use concentration::core::GameConfig;
/// use concentration::game::{ConcentrationGame, TimerQueue};
/// use concentration::render::RenderEvent;
///
/// let mut dealt = 0;
/// let catalog = FaceCatalog::new(["a", "b"]);
/// let config = GameConfig::new().with_pair_count(2).with_seed(1);
/// let sink = |event: &RenderEvent| {
///     if matches!(event, RenderEvent::DeckDealt { .. }) {
///         dealt += 1;
///     }
/// };
/// let game = ConcentrationGame::new(config, catalog, sink, TimerQueue::new()).unwrap();
/// drop(game);
/// assert_eq!(dealt, 1);
/// ```
pub trait RenderSink {
    /// Handle one event.
    fn render(&mut self, event: &RenderEvent);
}

impl<F> RenderSink for F
where
    F: FnMut(&RenderEvent),
{
    fn render(&mut self, event: &RenderEvent) {
        self(event);
    }
}

/// Discards every event. For headless play.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl RenderSink for NullSink {
    fn render(&mut self, _event: &RenderEvent) {}
}

/// Records every event in order.
#[derive(Clone, Debug, Default)]
pub struct RecordingSink {
    events: Vec<RenderEvent>,
}

impl RecordingSink {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Events recorded so far.
    #[must_use]
    pub fn events(&self) -> &[RenderEvent] {
        &self.events
    }

    /// Take the recorded events, leaving the recorder empty.
    pub fn take(&mut self) -> Vec<RenderEvent> {
        std::mem::take(&mut self.events)
    }

    /// Forget recorded events.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl RenderSink for RecordingSink {
    fn render(&mut self, event: &RenderEvent) {
        self.events.push(*event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_sink() {
        let mut sink = RecordingSink::new();
        sink.render(&RenderEvent::DeckDealt { card_count: 4 });
        sink.render(&RenderEvent::ScoreChanged {
            score: Score::default(),
        });

        assert_eq!(sink.events().len(), 2);
        assert_eq!(sink.events()[0], RenderEvent::DeckDealt { card_count: 4 });

        let taken = sink.take();
        assert_eq!(taken.len(), 2);
        assert!(sink.events().is_empty());
    }

    #[test]
    fn test_closure_sink() {
        let mut count = 0;
        {
            let mut sink = |_: &RenderEvent| count += 1;
            sink.render(&RenderEvent::DeckDealt { card_count: 2 });
            sink.render(&RenderEvent::DeckDealt { card_count: 2 });
        }
        assert_eq!(count, 2);
    }

    #[test]
    fn test_event_serialization() {
        let event = RenderEvent::StateChanged {
            from: GameState::WaitingForFirstCard,
            to: GameState::WaitingForSecondCard,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"StateChanged\""));
        let back: RenderEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
    }
}
