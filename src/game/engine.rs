//! The Concentration state machine.
//!
//! ## Transitions
//!
//! | State | Event | Next |
//! |---|---|---|
//! | WaitingForFirstCard | card turned up | WaitingForSecondCard |
//! | WaitingForSecondCard | partner turned up | NotifyingCorrectMatch, then WaitingForFirstCard or Complete |
//! | WaitingForSecondCard | other card turned up | NotifyingIncorrectMatch |
//! | NotifyingIncorrectMatch | card turned up | WaitingForSecondCard (wrong pair flipped back) |
//! | NotifyingIncorrectMatch | timeout | WaitingForFirstCard (wrong pair flipped back) |
//! | any | shuffle | WaitingForFirstCard (new deck) |
//! | any live state | solve | Solved |
//!
//! Every command takes `&mut self`, so commands are processed one at a time
//! and each one runs to completion before the next.

use std::time::Duration;

use smallvec::SmallVec;
use tracing::{debug, trace, warn};

use super::state::{Command, CommandKind, GameState, Ignored, Outcome, Score};
use super::timer::{TimeoutScheduler, TimeoutTicket, TimerQueue};
use crate::cards::{CardIndex, Deck, Face, FaceCatalog, FaceState};
use crate::core::{GameConfig, GameError, GameRng, GameRngState};
use crate::render::{
    CardSnapshot, CardView, Controls, GameSnapshot, NullSink, RenderEvent, RenderSink, Tint,
};

/// One Concentration session.
///
/// Owns the deck and the state machine. Talks to the host through a
/// [`RenderSink`] (output) and a [`TimeoutScheduler`] (the mismatch timer).
///
/// ## Example
///
/// ```
/// use std::time::Duration;
/// use concentration::cards::{CardIndex, FaceCatalog};
/// use concentration::core::GameConfig;
/// use concentration::game::{ConcentrationGame, GameState};
///
/// let catalog = FaceCatalog::new(["ant.png", "bee.png", "cat.png"]);
/// let config = GameConfig::new().with_pair_count(3).with_seed(42);
/// let mut game = ConcentrationGame::headless(config, catalog).unwrap();
///
/// let first = CardIndex::new(0);
/// let partner = game.deck().get(first).unwrap().partner();
///
/// game.on_card_activated(first);
/// assert_eq!(game.state(), GameState::WaitingForSecondCard);
///
/// game.on_card_activated(partner);
/// assert_eq!(game.state(), GameState::WaitingForFirstCard);
/// assert_eq!(game.score().hits, 1);
/// ```
pub struct ConcentrationGame<S = NullSink, T = TimerQueue> {
    config: GameConfig,
    catalog: FaceCatalog,
    rng: GameRng,
    deck: Deck,
    selection: SmallVec<[CardIndex; 2]>,
    score: Score,
    state: GameState,
    controls: Controls,
    /// Ticket of the outstanding mismatch timeout. Some iff NotifyingIncorrectMatch.
    pending: Option<TimeoutTicket>,
    generation: u64,
    sink: S,
    scheduler: T,
}

impl ConcentrationGame<NullSink, TimerQueue> {
    /// Create a game with no renderer and a virtual-clock timer.
    pub fn headless(config: GameConfig, catalog: FaceCatalog) -> Result<Self, GameError> {
        Self::new(config, catalog, NullSink, TimerQueue::new())
    }
}

impl<S: RenderSink> ConcentrationGame<S, TimerQueue> {
    /// Move the virtual clock forward and fire due timeouts.
    ///
    /// Returns how many timeouts changed the game.
    pub fn advance(&mut self, elapsed: Duration) -> usize {
        let fired = self.scheduler.advance(elapsed);
        fired
            .into_iter()
            .filter(|&ticket| self.on_mismatch_timeout_fired(ticket).is_applied())
            .count()
    }
}

impl<S: RenderSink, T: TimeoutScheduler> ConcentrationGame<S, T> {
    /// Create a game and deal the first deck.
    ///
    /// Fails if the configuration is invalid or the catalog holds fewer
    /// faces than `config.pair_count`.
    pub fn new(
        config: GameConfig,
        catalog: FaceCatalog,
        sink: S,
        scheduler: T,
    ) -> Result<Self, GameError> {
        config.validate()?;
        let mut rng = GameRng::from_seed(config.seed);
        let deck = Deck::deal(&catalog, config.pair_count, &mut rng)?;
        debug!(
            pairs = config.pair_count,
            faces = catalog.len(),
            seed = rng.seed(),
            "new game"
        );

        let mut game = Self {
            config,
            catalog,
            rng,
            deck: Deck::default(),
            selection: SmallVec::new(),
            score: Score::default(),
            state: GameState::WaitingForFirstCard,
            controls: Controls::default(),
            pending: None,
            generation: 0,
            sink,
            scheduler,
        };
        game.install_deck(deck);
        Ok(game)
    }

    // === Accessors ===

    /// The configuration this game was created with.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Seed of the deal RNG.
    ///
    /// Drawn from entropy when the configuration has none. A new game
    /// configured with this seed deals the same decks in the same order.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Position of the deal RNG. [`GameRng::from_state`] on this value
    /// deals the same deck the next shuffle will.
    #[must_use]
    pub fn rng_state(&self) -> GameRngState {
        self.rng.state()
    }

    /// The face catalog.
    #[must_use]
    pub fn catalog(&self) -> &FaceCatalog {
        &self.catalog
    }

    /// The current deck.
    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// The current state.
    #[must_use]
    pub fn state(&self) -> GameState {
        self.state
    }

    /// Hits and misses this round.
    #[must_use]
    pub fn score(&self) -> Score {
        self.score
    }

    /// Control state.
    #[must_use]
    pub fn controls(&self) -> Controls {
        self.controls
    }

    /// Cards turned up and not yet resolved (0, 1 or 2).
    #[must_use]
    pub fn selection(&self) -> &[CardIndex] {
        &self.selection
    }

    /// The outstanding mismatch timeout, if any.
    #[must_use]
    pub fn pending_timeout(&self) -> Option<TimeoutTicket> {
        self.pending
    }

    /// The render sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable access to the render sink.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// The timeout scheduler.
    pub fn scheduler(&self) -> &T {
        &self.scheduler
    }

    /// Mutable access to the timeout scheduler.
    pub fn scheduler_mut(&mut self) -> &mut T {
        &mut self.scheduler
    }

    /// The face shown by a card, if it is revealed.
    #[must_use]
    pub fn revealed_face(&self, index: CardIndex) -> Option<&Face> {
        let card = self.deck.get(index)?;
        if card.state().is_revealed() {
            self.catalog.get(card.face())
        } else {
            None
        }
    }

    /// How a card looks right now.
    #[must_use]
    pub fn card_view(&self, index: CardIndex) -> Option<CardView> {
        let card = self.deck.get(index)?;
        let tint = match card.state() {
            FaceState::Matched => Tint::Matched,
            FaceState::FaceUp
                if self.state == GameState::NotifyingIncorrectMatch
                    && self.selection.contains(&index) =>
            {
                Tint::Mismatch
            }
            FaceState::FaceUp if self.state.is_over() => Tint::Unsolved,
            FaceState::FaceUp | FaceState::FaceDown => Tint::Neutral,
        };
        Some(CardView {
            index,
            face: card.state().is_revealed().then(|| card.face()),
            state: card.state(),
            tint,
        })
    }

    /// Views of every card, in display order.
    pub fn card_views(&self) -> impl Iterator<Item = CardView> + '_ {
        self.deck.iter().filter_map(move |(index, _)| self.card_view(index))
    }

    /// A full copy of the observable state.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        let cards = self
            .card_views()
            .map(|view| {
                let face = self.revealed_face(view.index);
                CardSnapshot::from_view(
                    view,
                    face.map(|f| f.name.as_str()),
                    face.map(Face::label),
                )
            })
            .collect();

        GameSnapshot {
            state: self.state,
            score: self.score,
            controls: self.controls,
            pair_count: self.deck.pair_count(),
            seed: self.rng.seed(),
            cards,
            timeout_pending: self.pending.is_some(),
        }
    }

    /// Check the engine's structural invariants.
    ///
    /// Always true unless there is a bug; exposed for tests and debug hosts.
    #[must_use]
    pub fn invariants_hold(&self) -> bool {
        let selection_ok = self
            .selection
            .iter()
            .all(|&i| self.deck.get(i).is_some_and(|c| c.is_face_up()));

        let selection_len_ok = match self.state {
            GameState::WaitingForFirstCard => self.selection.is_empty(),
            GameState::WaitingForSecondCard => self.selection.len() == 1,
            GameState::NotifyingIncorrectMatch => self.selection.len() == 2,
            GameState::NotifyingCorrectMatch => self.selection.len() <= 2,
            GameState::Complete | GameState::Solved => self.selection.is_empty(),
        };

        let face_down = self.deck.indices_in_state(FaceState::FaceDown).count();
        let face_up = self.deck.indices_in_state(FaceState::FaceUp).count();
        let board_ok = if self.state.is_over() {
            face_down == 0
        } else {
            face_up == self.selection.len()
        };

        let hits = self.score.hits as usize;
        let score_ok = hits <= self.deck.pair_count()
            && self.deck.matched_count() == hits * 2
            && (hits < self.deck.pair_count() || self.state == GameState::Complete);

        let pending_ok =
            self.pending.is_some() == (self.state == GameState::NotifyingIncorrectMatch);

        selection_ok
            && selection_len_ok
            && board_ok
            && score_ok
            && pending_ok
            && self.deck.is_well_paired()
    }

    // === Commands ===

    /// Route a command to its handler.
    ///
    /// Only `ShuffleRequested` can fail.
    pub fn dispatch(&mut self, command: Command) -> Result<Outcome, GameError> {
        match command {
            Command::CardActivated { card } => Ok(self.on_card_activated(card)),
            Command::ShuffleRequested => self.on_shuffle_requested(),
            Command::SolveRequested => Ok(self.on_solve_requested()),
            Command::MismatchTimeoutFired { ticket } => Ok(self.on_mismatch_timeout_fired(ticket)),
        }
    }

    /// The player clicked a card.
    pub fn on_card_activated(&mut self, index: CardIndex) -> Outcome {
        let from = self.state;
        let Some(card) = self.deck.get(index) else {
            return self.ignore(Ignored::UnknownCard { card: index });
        };

        match self.state {
            GameState::WaitingForFirstCard
            | GameState::WaitingForSecondCard
            | GameState::NotifyingIncorrectMatch => {}
            GameState::NotifyingCorrectMatch | GameState::Complete | GameState::Solved => {
                let reason = if card.state().is_revealed() {
                    Ignored::CardUnavailable { card: index }
                } else {
                    Ignored::InvalidTransition {
                        state: self.state,
                        command: CommandKind::CardActivated,
                    }
                };
                return self.ignore(reason);
            }
        }

        if !self.flip_up(index) {
            return self.ignore(Ignored::CardUnavailable { card: index });
        }

        match self.state {
            GameState::WaitingForFirstCard => {
                self.selection.push(index);
                self.set_state(GameState::WaitingForSecondCard);
            }
            GameState::WaitingForSecondCard => {
                self.selection.push(index);
                let first = self.selection[0];
                if self.deck.are_partners(first, index) {
                    self.resolve_correct_match();
                } else {
                    self.enter_incorrect_match();
                }
            }
            _ => {
                // NotifyingIncorrectMatch: the wrong pair goes back down early.
                self.cancel_timeout();
                self.hide_selection();
                self.selection.push(index);
                self.set_state(GameState::WaitingForSecondCard);
            }
        }

        Outcome::Applied {
            from,
            to: self.state,
        }
    }

    /// The player asked for a new deal.
    ///
    /// On error nothing changes: the old deck, score and any pending
    /// timeout are kept.
    pub fn on_shuffle_requested(&mut self) -> Result<Outcome, GameError> {
        let deck = Deck::deal(&self.catalog, self.config.pair_count, &mut self.rng)?;
        Ok(self.start_round(deck))
    }

    /// Swap in a new face catalog and deal from it.
    ///
    /// For hosts that reload their face list. On error the old catalog and
    /// the current round are kept.
    pub fn reload_catalog(&mut self, catalog: FaceCatalog) -> Result<Outcome, GameError> {
        let deck = Deck::deal(&catalog, self.config.pair_count, &mut self.rng)?;
        debug!(faces = catalog.len(), "face catalog reloaded");
        self.catalog = catalog;
        Ok(self.start_round(deck))
    }

    /// The player asked to see the solution.
    pub fn on_solve_requested(&mut self) -> Outcome {
        let from = self.state;
        if !self.controls.solve_enabled || self.state.is_over() {
            return self.ignore(Ignored::InvalidTransition {
                state: self.state,
                command: CommandKind::SolveRequested,
            });
        }

        self.cancel_timeout();
        self.selection.clear();
        self.set_state(GameState::Solved);
        self.reveal_board();

        Outcome::Applied {
            from,
            to: self.state,
        }
    }

    /// A mismatch timeout came due.
    ///
    /// Tickets other than the pending one are stale and discarded.
    pub fn on_mismatch_timeout_fired(&mut self, ticket: TimeoutTicket) -> Outcome {
        let from = self.state;
        if self.pending != Some(ticket) || self.state != GameState::NotifyingIncorrectMatch {
            return self.ignore(Ignored::StaleTimeout { ticket });
        }

        self.pending = None;
        self.enter_waiting_for_first_card();

        Outcome::Applied {
            from,
            to: self.state,
        }
    }

    // === Transitions ===

    fn start_round(&mut self, deck: Deck) -> Outcome {
        let from = self.state;
        self.cancel_timeout();
        self.install_deck(deck);
        Outcome::Applied {
            from,
            to: self.state,
        }
    }

    fn install_deck(&mut self, deck: Deck) {
        self.deck = deck;
        self.selection.clear();
        self.score = Score::default();
        self.controls = Controls::default();

        self.emit(RenderEvent::DeckDealt {
            card_count: self.deck.len(),
        });
        self.emit(RenderEvent::ScoreChanged { score: self.score });
        self.emit(RenderEvent::ControlsChanged {
            controls: self.controls,
        });
        self.set_state(GameState::WaitingForFirstCard);
    }

    fn enter_waiting_for_first_card(&mut self) {
        self.hide_selection();
        self.set_state(GameState::WaitingForFirstCard);
        self.set_controls(Controls::default());
    }

    fn enter_incorrect_match(&mut self) {
        self.set_state(GameState::NotifyingIncorrectMatch);

        // Both cards turn red.
        for index in self.selection.clone() {
            self.emit_card(index);
        }

        self.score.misses += 1;
        self.emit(RenderEvent::ScoreChanged { score: self.score });
        self.schedule_timeout();
    }

    fn resolve_correct_match(&mut self) {
        self.set_state(GameState::NotifyingCorrectMatch);

        let pair = std::mem::take(&mut self.selection);
        for &index in &pair {
            if let Some(card) = self.deck.get_mut(index) {
                card.mark_matched();
            }
            self.emit_card(index);
        }

        self.score.hits += 1;
        self.emit(RenderEvent::ScoreChanged { score: self.score });

        if self.score.hits as usize == self.deck.pair_count() {
            self.set_state(GameState::Complete);
            self.reveal_board();
        } else {
            self.enter_waiting_for_first_card();
        }
    }

    /// Shared by Complete and Solved: turn every unmatched card up and
    /// close the round.
    fn reveal_board(&mut self) {
        let unmatched: Vec<CardIndex> = self
            .deck
            .iter()
            .filter(|(_, c)| !c.is_matched())
            .map(|(i, _)| i)
            .collect();

        for index in unmatched {
            if let Some(card) = self.deck.get_mut(index) {
                card.flip_up();
            }
            self.emit_card(index);
        }

        self.set_controls(Controls::round_over());
    }

    /// Flip the selected cards back down and forget them.
    fn hide_selection(&mut self) {
        let selected = std::mem::take(&mut self.selection);
        for index in selected {
            let flipped = self
                .deck
                .get_mut(index)
                .is_some_and(|card| card.flip_down());
            if flipped {
                self.emit_card(index);
            }
        }
    }

    fn flip_up(&mut self, index: CardIndex) -> bool {
        let flipped = self
            .deck
            .get_mut(index)
            .is_some_and(|card| card.flip_up());
        if flipped {
            self.emit_card(index);
        }
        flipped
    }

    fn set_state(&mut self, to: GameState) {
        let from = self.state;
        if from == to {
            return;
        }
        self.state = to;
        debug!(%from, %to, hits = self.score.hits, misses = self.score.misses, "state changed");
        self.emit(RenderEvent::StateChanged { from, to });
    }

    fn set_controls(&mut self, controls: Controls) {
        if self.controls != controls {
            self.controls = controls;
            self.emit(RenderEvent::ControlsChanged { controls });
        }
    }

    // === Timeout ===

    fn schedule_timeout(&mut self) {
        self.cancel_timeout();
        self.generation += 1;
        let ticket = TimeoutTicket::new(self.generation);
        self.pending = Some(ticket);
        self.scheduler.schedule(ticket, self.config.mismatch_delay());
    }

    fn cancel_timeout(&mut self) {
        if let Some(ticket) = self.pending.take() {
            self.scheduler.cancel(ticket);
        }
    }

    // === Output ===

    fn emit(&mut self, event: RenderEvent) {
        self.sink.render(&event);
    }

    fn emit_card(&mut self, index: CardIndex) {
        if let Some(view) = self.card_view(index) {
            self.emit(RenderEvent::CardChanged { view });
        }
    }

    fn ignore(&self, reason: Ignored) -> Outcome {
        match reason {
            Ignored::InvalidTransition { state, command } => {
                warn!(%state, ?command, "no transition for command");
            }
            Ignored::UnknownCard { card } => {
                warn!(%card, cards = self.deck.len(), "card index out of range");
            }
            Ignored::StaleTimeout { ticket } => {
                debug!(%ticket, pending = ?self.pending, "stale timeout discarded");
            }
            Ignored::CardUnavailable { card } => {
                trace!(%card, "card already up or matched");
            }
        }
        Outcome::Ignored { reason }
    }
}

impl<S, T> std::fmt::Debug for ConcentrationGame<S, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConcentrationGame")
            .field("state", &self.state)
            .field("score", &self.score)
            .field("controls", &self.controls)
            .field("selection", &self.selection)
            .field("pending", &self.pending)
            .field("cards", &self.deck.len())
            .finish()
    }
}
