use std::collections::HashSet;

use anyhow::Result;
use rand_core::RngCore;
use serde::Serialize;
use tracing::{debug, info, trace};

use crate::core::config::GameConfig;
use crate::core::scheduler::{Fired, Scheduler, TimerId};

use super::deck::{generate_deck, Deck};
use super::snapshot::{format_elapsed, CardView, GameSnapshot};

/// Deferred work the game schedules on its clock collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryTimer {
    /// One second of play has passed.
    Tick,
    /// Flip a displayed mismatch back down and unlock input.
    ResolveMismatch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    /// No deck dealt yet.
    Idle,
    Playing,
    Won,
}

/// Why a click changed nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    NoDeck,
    Locked,
    AlreadyWon,
    OutOfBounds,
    AlreadyMatched,
    AlreadyFaceUp,
}

/// What a click did. Purely informational: a click never fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    Ignored(IgnoreReason),
    /// First card of a turn turned over.
    Flipped,
    Matched { pair_id: u32 },
    /// Second card differs; the pair stays up until the resolution fires.
    Mismatched,
    /// The last pair was matched.
    Won,
}

/// Mutable part of a game, replaced wholesale on every deal
#[derive(Debug, Clone, Default)]
pub struct MemoryState {
    pub deck: Deck,
    /// Deck positions turned over this turn, at most two.
    pub face_up: Vec<usize>,
    /// Ids of cards permanently revealed, always added in pairs.
    pub matched: HashSet<u32>,
    pub locked: bool,
    pub score: u32,
    pub elapsed_seconds: u32,
    pub timer_running: bool,
}

/// The pairs game state machine.
///
/// All input arrives through three calls: [`MemoryGame::handle_card_click`],
/// [`MemoryGame::reset`] and [`MemoryGame::handle_timer`]. The caller is
/// expected to serialise them; nothing here blocks.
pub struct MemoryGame<S: Scheduler<MemoryTimer>, R: RngCore> {
    config: GameConfig,
    rng: R,
    scheduler: S,
    state: MemoryState,
    clock: Option<TimerId>,
    pending_resolution: Option<TimerId>,
}

impl<S: Scheduler<MemoryTimer>, R: RngCore> MemoryGame<S, R> {
    /// Create an idle game. No deck is dealt until [`MemoryGame::initialize`].
    ///
    /// Fails if `config` does not pass [`GameConfig::validate`].
    pub fn new(config: GameConfig, rng: R, scheduler: S) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            rng,
            scheduler,
            state: MemoryState::default(),
            clock: None,
            pending_resolution: None,
        })
    }

    /// First activation: deal the opening deck. Does nothing once a deck exists.
    pub fn initialize(&mut self) {
        if !self.state.deck.is_empty() {
            debug!("initialize called on an active game, ignoring");
            return;
        }
        self.deal();
    }

    /// Throw the current game away and deal a new one, from any phase.
    pub fn reset(&mut self) {
        info!(score = self.state.score, elapsed = self.state.elapsed_seconds, "resetting game");
        self.deal();
    }

    pub fn handle_card_click(&mut self, index: usize) -> ClickOutcome {
        if self.state.deck.is_empty() {
            return ClickOutcome::Ignored(IgnoreReason::NoDeck);
        }

        self.start_clock_on_first_flip();

        let outcome = self.flip(index);
        match outcome {
            ClickOutcome::Ignored(reason) => trace!(index, ?reason, "click ignored"),
            _ => debug!(index, ?outcome, "card clicked"),
        }
        outcome
    }

    /// Route a timer firing. Firings for timers this game no longer holds
    /// are dropped.
    pub fn handle_timer(&mut self, fired: Fired<MemoryTimer>) {
        match fired.event {
            MemoryTimer::Tick => {
                if self.clock != Some(fired.id) || !self.state.timer_running {
                    trace!(id = ?fired.id, "stale tick dropped");
                    return;
                }
                self.state.elapsed_seconds += 1;
                trace!(elapsed = self.state.elapsed_seconds, "tick");
            }
            MemoryTimer::ResolveMismatch => {
                if self.pending_resolution != Some(fired.id) {
                    trace!(id = ?fired.id, "stale mismatch resolution dropped");
                    return;
                }
                self.pending_resolution = None;
                self.scheduler.cancel(fired.id);
                self.state.face_up.clear();
                self.state.locked = false;
                debug!("mismatch turned back over");
            }
        }
    }

    /// Cancel every outstanding timer. Also runs on drop.
    pub fn shutdown(&mut self) {
        self.stop_clock();
        if let Some(id) = self.pending_resolution.take() {
            self.scheduler.cancel(id);
        }
    }

    pub fn is_card_face_up(&self, index: usize) -> bool {
        match self.state.deck.get(index) {
            Some(card) => {
                self.state.face_up.contains(&index) || self.state.matched.contains(&card.id)
            }
            None => false,
        }
    }

    /// Whether a click at `index` would be acted on right now.
    pub fn is_card_selectable(&self, index: usize) -> bool {
        match self.state.deck.get(index) {
            Some(card) => {
                !self.state.locked
                    && !self.is_won()
                    && !self.state.matched.contains(&card.id)
                    && !self.state.face_up.contains(&index)
            }
            None => false,
        }
    }

    pub fn is_won(&self) -> bool {
        !self.state.deck.is_empty() && self.state.matched.len() == self.state.deck.len()
    }

    pub fn phase(&self) -> Phase {
        if self.state.deck.is_empty() {
            Phase::Idle
        } else if self.is_won() {
            Phase::Won
        } else {
            Phase::Playing
        }
    }

    pub fn state(&self) -> &MemoryState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn formatted_time(&self) -> String {
        format_elapsed(self.state.elapsed_seconds)
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let cards = self
            .state
            .deck
            .iter()
            .enumerate()
            .map(|(index, card)| CardView {
                index,
                id: card.id,
                pair_id: card.pair_id,
                symbol: card.symbol.clone(),
                face_up: self.is_card_face_up(index),
                matched: self.state.matched.contains(&card.id),
                selectable: self.is_card_selectable(index),
            })
            .collect();

        GameSnapshot {
            phase: self.phase(),
            cards,
            score: self.state.score,
            elapsed_seconds: self.state.elapsed_seconds,
            elapsed: self.formatted_time(),
            timer_running: self.state.timer_running,
            locked: self.state.locked,
            won: self.is_won(),
        }
    }

    fn deal(&mut self) {
        self.shutdown();
        self.state = MemoryState {
            deck: generate_deck(self.config.symbols.as_slice(), &mut self.rng),
            ..MemoryState::default()
        };
        info!(cards = self.state.deck.len(), "dealt new deck");
    }

    /// The clock starts on the very first flip of a fresh game and at no
    /// other time.
    fn start_clock_on_first_flip(&mut self) {
        let fresh = !self.state.timer_running
            && !self.is_won()
            && self.state.matched.is_empty()
            && self.state.face_up.is_empty();
        if !fresh {
            return;
        }
        let id = self
            .scheduler
            .schedule_repeating(self.config.tick_interval(), MemoryTimer::Tick);
        self.clock = Some(id);
        self.state.timer_running = true;
        debug!("clock started");
    }

    fn stop_clock(&mut self) {
        if let Some(id) = self.clock.take() {
            self.scheduler.cancel(id);
        }
        self.state.timer_running = false;
    }

    fn flip(&mut self, index: usize) -> ClickOutcome {
        if self.state.locked {
            return ClickOutcome::Ignored(IgnoreReason::Locked);
        }
        if self.is_won() {
            return ClickOutcome::Ignored(IgnoreReason::AlreadyWon);
        }
        let Some(card) = self.state.deck.get(index) else {
            return ClickOutcome::Ignored(IgnoreReason::OutOfBounds);
        };
        if self.state.matched.contains(&card.id) {
            return ClickOutcome::Ignored(IgnoreReason::AlreadyMatched);
        }
        if self.state.face_up.contains(&index) {
            return ClickOutcome::Ignored(IgnoreReason::AlreadyFaceUp);
        }

        self.state.face_up.push(index);
        if self.state.face_up.len() < 2 {
            return ClickOutcome::Flipped;
        }

        self.state.locked = true;
        let first = &self.state.deck[self.state.face_up[0]];
        let second = &self.state.deck[self.state.face_up[1]];

        if first.pair_id != second.pair_id {
            let id = self
                .scheduler
                .schedule_once(self.config.mismatch_delay(), MemoryTimer::ResolveMismatch);
            self.pending_resolution = Some(id);
            return ClickOutcome::Mismatched;
        }

        let (pair_id, first_id, second_id) = (first.pair_id, first.id, second.id);
        self.state.matched.insert(first_id);
        self.state.matched.insert(second_id);
        self.state.score = self.state.score.saturating_add(self.config.match_points);
        self.state.face_up.clear();
        self.state.locked = false;

        if self.is_won() {
            self.stop_clock();
            info!(
                score = self.state.score,
                time = %self.formatted_time(),
                "all pairs found"
            );
            return ClickOutcome::Won;
        }
        ClickOutcome::Matched { pair_id }
    }
}

impl<S: Scheduler<MemoryTimer>, R: RngCore> Drop for MemoryGame<S, R> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
