//! Game states, commands, and command outcomes.

use serde::{Deserialize, Serialize};

use super::timer::TimeoutTicket;
use crate::cards::CardIndex;

/// The state of one round.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameState {
    /// No unresolved card is face up.
    #[default]
    WaitingForFirstCard,
    /// One card is face up.
    WaitingForSecondCard,
    /// A wrong pair is showing; it flips back on timeout or on the next pick.
    NotifyingIncorrectMatch,
    /// A pair was found. Transient: resolves before the command returns.
    NotifyingCorrectMatch,
    /// Every pair was found. Terminal until shuffle.
    Complete,
    /// The player asked for the solution. Terminal until shuffle.
    Solved,
}

impl GameState {
    /// Is the round over (Complete or Solved)?
    #[must_use]
    pub const fn is_over(self) -> bool {
        matches!(self, GameState::Complete | GameState::Solved)
    }

    /// Short lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            GameState::WaitingForFirstCard => "waiting_for_first_card",
            GameState::WaitingForSecondCard => "waiting_for_second_card",
            GameState::NotifyingIncorrectMatch => "notifying_incorrect_match",
            GameState::NotifyingCorrectMatch => "notifying_correct_match",
            GameState::Complete => "complete",
            GameState::Solved => "solved",
        }
    }
}

impl std::fmt::Display for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hit and miss counters for the current round.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Score {
    /// Pairs found.
    pub hits: u32,
    /// Wrong pairs turned up.
    pub misses: u32,
}

impl Score {
    /// Total pairs attempted.
    #[must_use]
    pub const fn attempts(&self) -> u32 {
        self.hits + self.misses
    }
}

/// A command from the presentation layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Command {
    /// The player clicked a card.
    CardActivated { card: CardIndex },
    /// The player asked for a new deal.
    ShuffleRequested,
    /// The player asked to see the solution.
    SolveRequested,
    /// A scheduled mismatch timeout came due.
    MismatchTimeoutFired { ticket: TimeoutTicket },
}

impl Command {
    /// The command without its payload.
    #[must_use]
    pub const fn kind(&self) -> CommandKind {
        match self {
            Command::CardActivated { .. } => CommandKind::CardActivated,
            Command::ShuffleRequested => CommandKind::ShuffleRequested,
            Command::SolveRequested => CommandKind::SolveRequested,
            Command::MismatchTimeoutFired { .. } => CommandKind::MismatchTimeoutFired,
        }
    }
}

/// Payload-free command discriminant, used in diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommandKind {
    CardActivated,
    ShuffleRequested,
    SolveRequested,
    MismatchTimeoutFired,
}

/// What a command did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Outcome {
    /// The command was handled. `from` and `to` may be equal.
    Applied { from: GameState, to: GameState },
    /// The command had no effect.
    Ignored { reason: Ignored },
}

impl Outcome {
    /// Did the command change anything?
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied { .. })
    }

    /// The reason the command was ignored, if it was.
    #[must_use]
    pub const fn ignored(&self) -> Option<Ignored> {
        match self {
            Outcome::Ignored { reason } => Some(*reason),
            Outcome::Applied { .. } => None,
        }
    }
}

/// Why a command was a no-op. None of these are errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Ignored {
    /// The card is already face up or matched.
    CardUnavailable { card: CardIndex },
    /// The index is outside the deck.
    UnknownCard { card: CardIndex },
    /// No transition exists for this command in this state.
    InvalidTransition { state: GameState, command: CommandKind },
    /// The timeout belongs to a state that was already left.
    StaleTimeout { ticket: TimeoutTicket },
}
