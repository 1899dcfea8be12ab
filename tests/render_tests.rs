//! Render event integration tests.
//!
//! These tests verify the exact events a host receives, in order, for each
//! kind of move, and the snapshot a host can take instead.

use std::time::Duration;

use concentration::cards::{CardIndex, FaceCatalog, FaceState};
use concentration::core::GameConfig;
use concentration::game::{ConcentrationGame, GameState, Score, TimerQueue};
use concentration::render::{
    CardView, Controls, GameSnapshot, RecordingSink, RenderEvent, RenderSink, Tint,
};

type Game = ConcentrationGame<RecordingSink, TimerQueue>;

fn new_game(pairs: usize) -> Game {
    let catalog = FaceCatalog::new([
        "owl.png", "fox.png", "bear.jpeg", "wolf", "lynx.png", "hare.png",
    ]);
    let config = GameConfig::new().with_pair_count(pairs).with_seed(99);
    ConcentrationGame::new(config, catalog, RecordingSink::new(), TimerQueue::new()).unwrap()
}

fn view(game: &Game, index: CardIndex) -> CardView {
    game.card_view(index).unwrap()
}

fn stranger_of(game: &Game, index: CardIndex) -> CardIndex {
    let partner = game.deck().get(index).unwrap().partner();
    game.deck()
        .indices_in_state(FaceState::FaceDown)
        .find(|&i| i != index && i != partner)
        .unwrap()
}

fn up(game: &Game, index: CardIndex, tint: Tint) -> RenderEvent {
    RenderEvent::CardChanged {
        view: CardView {
            index,
            face: Some(game.deck().get(index).unwrap().face()),
            state: FaceState::FaceUp,
            tint,
        },
    }
}

fn down(index: CardIndex) -> RenderEvent {
    RenderEvent::CardChanged {
        view: CardView {
            index,
            face: None,
            state: FaceState::FaceDown,
            tint: Tint::Neutral,
        },
    }
}

fn matched(game: &Game, index: CardIndex) -> RenderEvent {
    RenderEvent::CardChanged {
        view: CardView {
            index,
            face: Some(game.deck().get(index).unwrap().face()),
            state: FaceState::Matched,
            tint: Tint::Matched,
        },
    }
}

// =============================================================================
// Event sequences
// =============================================================================

/// A new game announces the deal, the score and the controls.
#[test]
fn test_new_game_events() {
    let game = new_game(3);
    assert_eq!(
        game.sink().events(),
        &[
            RenderEvent::DeckDealt { card_count: 6 },
            RenderEvent::ScoreChanged {
                score: Score::default()
            },
            RenderEvent::ControlsChanged {
                controls: Controls::default()
            },
        ]
    );
}

/// First card: the card turns up, then the state changes.
#[test]
fn test_first_card_events() {
    let mut game = new_game(3);
    game.sink_mut().clear();
    let a = CardIndex::new(0);

    game.on_card_activated(a);

    let expected = vec![
        up(&game, a, Tint::Neutral),
        RenderEvent::StateChanged {
            from: GameState::WaitingForFirstCard,
            to: GameState::WaitingForSecondCard,
        },
    ];
    assert_eq!(game.sink().events(), expected.as_slice());
}

/// Matching pair: second card up, both go green, a hit, back to waiting.
#[test]
fn test_match_events() {
    let mut game = new_game(3);
    let a = CardIndex::new(0);
    let b = game.deck().get(a).unwrap().partner();
    game.on_card_activated(a);
    game.sink_mut().clear();

    game.on_card_activated(b);

    let expected = vec![
        up(&game, b, Tint::Neutral),
        RenderEvent::StateChanged {
            from: GameState::WaitingForSecondCard,
            to: GameState::NotifyingCorrectMatch,
        },
        matched(&game, a),
        matched(&game, b),
        RenderEvent::ScoreChanged {
            score: Score { hits: 1, misses: 0 },
        },
        RenderEvent::StateChanged {
            from: GameState::NotifyingCorrectMatch,
            to: GameState::WaitingForFirstCard,
        },
    ];
    assert_eq!(game.sink().events(), expected.as_slice());
}

/// Wrong pair: second card up, both go red, a miss.
#[test]
fn test_mismatch_events() {
    let mut game = new_game(3);
    let a = CardIndex::new(0);
    let b = stranger_of(&game, a);
    game.on_card_activated(a);
    game.sink_mut().clear();

    game.on_card_activated(b);

    let expected = vec![
        up(&game, b, Tint::Neutral),
        RenderEvent::StateChanged {
            from: GameState::WaitingForSecondCard,
            to: GameState::NotifyingIncorrectMatch,
        },
        up(&game, a, Tint::Mismatch),
        up(&game, b, Tint::Mismatch),
        RenderEvent::ScoreChanged {
            score: Score { hits: 0, misses: 1 },
        },
    ];
    assert_eq!(game.sink().events(), expected.as_slice());
}

/// Timeout: the wrong pair turns down, then the state changes.
#[test]
fn test_timeout_events() {
    let mut game = new_game(3);
    let a = CardIndex::new(0);
    let b = stranger_of(&game, a);
    game.on_card_activated(a);
    game.on_card_activated(b);
    game.sink_mut().clear();

    game.advance(Duration::from_millis(1000));

    assert_eq!(
        game.sink().events(),
        &[
            down(a),
            down(b),
            RenderEvent::StateChanged {
                from: GameState::NotifyingIncorrectMatch,
                to: GameState::WaitingForFirstCard,
            },
        ]
    );
}

/// Solve: unmatched cards go red and the controls change last.
#[test]
fn test_solve_events() {
    let mut game = new_game(2);
    game.sink_mut().clear();

    game.on_solve_requested();

    let events = game.sink_mut().take();
    assert_eq!(
        events[0],
        RenderEvent::StateChanged {
            from: GameState::WaitingForFirstCard,
            to: GameState::Solved,
        }
    );
    let reds = events
        .iter()
        .filter(|e| {
            matches!(
                e,
                RenderEvent::CardChanged { view } if view.tint == Tint::Unsolved
            )
        })
        .count();
    assert_eq!(reds, 4);
    assert_eq!(
        events.last(),
        Some(&RenderEvent::ControlsChanged {
            controls: Controls::round_over()
        })
    );
}

/// Ignored commands emit nothing.
#[test]
fn test_ignored_commands_are_silent() {
    let mut game = new_game(2);
    let a = CardIndex::new(0);
    game.on_card_activated(a);
    game.sink_mut().clear();

    game.on_card_activated(a);
    game.on_card_activated(CardIndex::new(50));
    assert!(game.sink().events().is_empty());
}

/// Shuffle redeals and resets the controls.
#[test]
fn test_shuffle_events() {
    let mut game = new_game(2);
    game.on_solve_requested();
    game.sink_mut().clear();

    game.on_shuffle_requested().unwrap();

    assert_eq!(
        game.sink().events(),
        &[
            RenderEvent::DeckDealt { card_count: 4 },
            RenderEvent::ScoreChanged {
                score: Score::default()
            },
            RenderEvent::ControlsChanged {
                controls: Controls::default()
            },
            RenderEvent::StateChanged {
                from: GameState::Solved,
                to: GameState::WaitingForFirstCard,
            },
        ]
    );
}

/// Any `FnMut` closure is a sink.
#[test]
fn test_closure_sink_sees_every_state_change() {
    let mut states = Vec::new();
    {
        let sink = |event: &RenderEvent| {
            if let RenderEvent::StateChanged { to, .. } = event {
                states.push(*to);
            }
        };
        let config = GameConfig::new().with_pair_count(2).with_seed(4);
        let catalog = FaceCatalog::new(["a", "b"]);
        let mut game = ConcentrationGame::new(config, catalog, sink, TimerQueue::new()).unwrap();
        game.on_card_activated(CardIndex::new(0));
        game.on_solve_requested();
    }
    assert_eq!(
        states,
        vec![GameState::WaitingForSecondCard, GameState::Solved]
    );
}

/// A boxed sink works through the trait object.
#[test]
fn test_boxed_sink() {
    let mut recorder = RecordingSink::new();
    {
        let sink: &mut dyn RenderSink = &mut recorder;
        sink.render(&RenderEvent::DeckDealt { card_count: 2 });
    }
    assert_eq!(recorder.events().len(), 1);
}

// =============================================================================
// Snapshots
// =============================================================================

/// Faces show in the snapshot only while revealed.
#[test]
fn test_snapshot_hides_face_down_cards() {
    let mut game = new_game(3);
    let a = CardIndex::new(0);
    game.on_card_activated(a);

    let snapshot = game.snapshot();
    assert_eq!(snapshot.state, GameState::WaitingForSecondCard);
    assert_eq!(snapshot.pair_count, 3);
    assert_eq!(snapshot.cards.len(), 6);
    assert_eq!(snapshot.revealed().count(), 1);
    assert!(!snapshot.timeout_pending);

    let shown = &snapshot.cards[0];
    let face = game.revealed_face(a).unwrap();
    assert_eq!(shown.face.as_deref(), Some(face.name.as_str()));
    assert_eq!(shown.label.as_deref(), Some(face.label()));
    assert!(snapshot.cards[1..].iter().all(|c| c.face.is_none()));

    assert_eq!(view(&game, a).state, FaceState::FaceUp);
}

/// Labels drop the file extension.
#[test]
fn test_snapshot_labels() {
    let mut game = new_game(6);
    game.on_solve_requested();

    let snapshot = game.snapshot();
    let mut labels: Vec<String> = snapshot
        .cards
        .iter()
        .filter_map(|c| c.label.clone())
        .collect();
    labels.sort();
    labels.dedup();
    assert_eq!(labels, vec!["bear", "fox", "hare", "lynx", "owl", "wolf"]);
}

/// Snapshots survive a JSON round trip.
#[test]
fn test_snapshot_json() {
    let mut game = new_game(3);
    game.on_card_activated(CardIndex::new(0));
    let snapshot = game.snapshot();

    let json = serde_json::to_string(&snapshot).unwrap();
    let back: GameSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(snapshot, back);
}
