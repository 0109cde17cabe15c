use std::collections::HashMap;
use std::time::Duration;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace};

use super::config::GameConfig;
use super::error::{ConfigError, InvalidSelection};
use super::events::{CardView, EventLog, EventSink, GameEvent};
use super::state::{Card, CardState, Grid, PendingSelection, SessionPhase, Symbol};
use super::stats::RunStats;
use super::timers::{TimerKind, TimerQueue, TimerToken};

/// What an accepted `select` did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectOutcome {
    /// First card of a pair is face up.
    AwaitingSecond { index: usize },
    /// The pair matches; it is removed once the match delay elapses.
    Matched { first: usize, second: usize },
    /// The pair differs; both flip back once the mismatch delay elapses.
    Mismatched { first: usize, second: usize },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardSnapshot {
    pub index: usize,
    pub symbol: Symbol,
    pub state: CardState,
    pub interactable: bool,
}

/// Owned copy of the session state for render-side code.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub generation: u64,
    pub phase: SessionPhase,
    pub rows: usize,
    pub columns: usize,
    pub active_cards: usize,
    pub cards: Vec<CardSnapshot>,
    pub pending: Vec<usize>,
    pub stats: RunStats,
}

/// One game of Pairs: grid, pending pair, timers and the win condition.
///
/// Delayed steps (end of the memorize window, match and mismatch resolution) are
/// queued on the session's virtual clock and applied by [`GameSession::advance`].
/// Every `start` begins a new generation, so timers left over from an earlier
/// game can never touch the current one.
pub struct GameSession<E = EventLog> {
    config: GameConfig,
    pool: Vec<Symbol>,
    phase: SessionPhase,
    generation: u64,
    grid: Grid,
    pending: PendingSelection,
    timers: TimerQueue,
    stats: RunStats,
    rejected: u32,
    play_started_at: Option<Duration>,
    sink: E,
}

impl GameSession<EventLog> {
    pub fn with_log(config: GameConfig) -> Result<Self, ConfigError> {
        Self::new(config, EventLog::new())
    }
}

impl<E: EventSink> GameSession<E> {
    #[instrument(skip(config, sink), fields(rows = config.rows, columns = config.columns))]
    pub fn new(config: GameConfig, sink: E) -> Result<Self, ConfigError> {
        config.validate()?;
        let pool = config.distinct_symbols();
        debug!(pool = pool.len(), "session created");
        Ok(GameSession {
            config,
            pool,
            phase: SessionPhase::NotStarted,
            generation: 0,
            grid: Grid::default(),
            pending: PendingSelection::default(),
            timers: TimerQueue::default(),
            stats: RunStats::default(),
            rejected: 0,
            play_started_at: None,
            sink,
        })
    }

    pub fn start(&mut self) {
        let mut rng = rand::rng();
        self.start_with_rng(&mut rng);
    }

    /// Deals a new random layout and opens the memorize window.
    #[instrument(skip(self, rng), fields(generation = self.generation + 1))]
    pub fn start_with_rng<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let mut pool = self.pool.clone();
        pool.shuffle(rng);
        let mut symbols: Vec<Symbol> = pool
            .into_iter()
            .take(self.config.pair_count())
            .flat_map(|symbol| [symbol.clone(), symbol])
            .collect();
        symbols.shuffle(rng);
        self.begin(symbols);
    }

    /// Starts a game on a fixed layout. Each symbol must appear exactly twice.
    #[instrument(skip(self, layout), fields(generation = self.generation + 1))]
    pub fn start_with_layout(&mut self, layout: Vec<Symbol>) -> Result<(), ConfigError> {
        let expected = self.config.cell_count();
        if layout.len() != expected {
            return Err(ConfigError::InvalidLayout {
                reason: format!("expected {expected} symbols, got {}", layout.len()),
            });
        }
        let mut counts: HashMap<&Symbol, usize> = HashMap::new();
        for symbol in &layout {
            *counts.entry(symbol).or_default() += 1;
        }
        if let Some((symbol, count)) = counts.iter().find(|(_, count)| **count != 2) {
            return Err(ConfigError::InvalidLayout {
                reason: format!("symbol {symbol} appears {count} times"),
            });
        }
        self.begin(layout);
        Ok(())
    }

    fn begin(&mut self, symbols: Vec<Symbol>) {
        self.generation = self.generation.wrapping_add(1);
        self.timers.clear();
        self.pending.clear();
        self.stats = RunStats::default();
        self.rejected = 0;
        self.play_started_at = None;
        self.grid = Grid::from_symbols(self.config.rows, self.config.columns, symbols);
        self.grid.set_all_interactable(false);
        self.phase = SessionPhase::Memorizing;
        debug!(
            generation = self.generation,
            cards = self.grid.len(),
            "game started"
        );

        let cards = self
            .grid
            .cards()
            .iter()
            .enumerate()
            .map(|(index, card)| CardView {
                index,
                row: index / self.config.columns,
                column: index % self.config.columns,
                symbol: card.symbol().clone(),
            })
            .collect();
        self.sink.emit(GameEvent::CardsRevealedAll { cards });

        let memorize = self.config.memorize();
        if memorize.is_zero() {
            self.finish_memorize();
        } else {
            self.schedule(TimerKind::MemorizeEnd, memorize);
        }
    }

    /// Turns a card face up. Rejected selections leave the session untouched;
    /// the only trace they leave is the `rejected_selections` tally, which is not
    /// part of the snapshot.
    #[instrument(level = "trace", skip(self), fields(generation = self.generation))]
    pub fn select(&mut self, index: usize) -> Result<SelectOutcome, InvalidSelection> {
        let result = self.try_select(index);
        if let Err(reason) = &result {
            if !matches!(self.phase, SessionPhase::NotStarted | SessionPhase::Won) {
                self.rejected = self.rejected.saturating_add(1);
            }
            trace!(%reason, "selection rejected");
        }
        result
    }

    fn try_select(&mut self, index: usize) -> Result<SelectOutcome, InvalidSelection> {
        match self.phase {
            SessionPhase::Playing => {}
            SessionPhase::Resolving => return Err(InvalidSelection::ResolutionPending),
            phase => return Err(InvalidSelection::NotPlaying { phase }),
        }

        let len = self.grid.len();
        let card = self
            .grid
            .get(index)
            .ok_or(InvalidSelection::OutOfRange { index, len })?;
        match card.state() {
            CardState::Matched => return Err(InvalidSelection::AlreadyMatched { index }),
            CardState::FaceUp => return Err(InvalidSelection::AlreadyFaceUp { index }),
            CardState::Hidden => {}
        }
        if !card.is_interactable() {
            return Err(InvalidSelection::NotInteractable { index });
        }
        if !self.pending.push(index) {
            return Err(InvalidSelection::ResolutionPending);
        }

        let card = self.grid.card_mut(index);
        card.state = CardState::FaceUp;
        card.interactable = false;
        let symbol = card.symbol().clone();
        self.sink.emit(GameEvent::CardDisabled { index, symbol });

        let Some((first, second)) = self.pending.pair() else {
            return Ok(SelectOutcome::AwaitingSecond { index });
        };

        self.phase = SessionPhase::Resolving;
        if self.pair_matches(first, second) {
            self.stats.matches = self.stats.matches.saturating_add(1);
            self.schedule(TimerKind::ResolveMatch, self.config.match_delay());
            debug!(first, second, "pair matched");
            Ok(SelectOutcome::Matched { first, second })
        } else {
            self.stats.mismatches = self.stats.mismatches.saturating_add(1);
            self.schedule(TimerKind::ResolveMismatch, self.config.mismatch_delay());
            debug!(first, second, "pair mismatched");
            Ok(SelectOutcome::Mismatched { first, second })
        }
    }

    /// Moves the virtual clock forward and applies every timer that came due.
    /// Returns how many were applied.
    pub fn advance(&mut self, elapsed: Duration) -> usize {
        self.timers.advance_clock(elapsed);
        let mut applied = 0;
        while let Some(token) = self.timers.pop_due() {
            if self.fire(token) {
                applied += 1;
            }
        }
        applied
    }

    /// Applies a timer immediately and drops its queued entry. Tokens from an
    /// earlier game, or that do not fit the current phase, are ignored.
    #[instrument(level = "debug", skip(self), fields(current = self.generation))]
    pub fn fire(&mut self, token: TimerToken) -> bool {
        if token.generation != self.generation {
            debug!("stale timer ignored");
            return false;
        }
        let applied = match (token.kind, self.phase) {
            (TimerKind::MemorizeEnd, SessionPhase::Memorizing) => {
                self.finish_memorize();
                true
            }
            (TimerKind::ResolveMatch, SessionPhase::Resolving) => self.resolve_match(),
            (TimerKind::ResolveMismatch, SessionPhase::Resolving) => self.resolve_mismatch(),
            _ => false,
        };
        if applied {
            self.timers.cancel(token);
        } else {
            debug!(phase = %self.phase, "timer does not apply to current phase");
        }
        applied
    }

    fn schedule(&mut self, kind: TimerKind, delay: Duration) {
        let token = TimerToken {
            generation: self.generation,
            kind,
        };
        self.timers.schedule(delay, token);
    }

    fn pair_matches(&self, first: usize, second: usize) -> bool {
        let cards = self.grid.cards();
        cards[first].symbol() == cards[second].symbol()
    }

    fn finish_memorize(&mut self) {
        self.grid.set_all_interactable(true);
        self.phase = SessionPhase::Playing;
        self.play_started_at = Some(self.timers.now());
        debug!(generation = self.generation, "memorize window closed");
        let indices = (0..self.grid.len()).collect();
        self.sink.emit(GameEvent::CardsEnabled { indices });
    }

    fn resolve_match(&mut self) -> bool {
        let Some((first, second)) = self.pending.pair() else {
            return false;
        };
        if !self.pair_matches(first, second) {
            return false;
        }
        let symbol = self.grid.cards()[first].symbol().clone();
        self.grid.mark_matched(first);
        self.grid.mark_matched(second);
        self.pending.clear();
        self.sink.emit(GameEvent::CardsMatched {
            first,
            second,
            symbol,
        });
        self.sink.emit(GameEvent::CardRemoved { index: first });
        self.sink.emit(GameEvent::CardRemoved { index: second });

        if self.grid.active() == 0 {
            self.win();
        } else {
            self.phase = SessionPhase::Playing;
        }
        true
    }

    fn resolve_mismatch(&mut self) -> bool {
        let Some((first, second)) = self.pending.pair() else {
            return false;
        };
        if self.pair_matches(first, second) {
            return false;
        }
        for index in [first, second] {
            let card = self.grid.card_mut(index);
            card.state = CardState::Hidden;
            card.interactable = true;
        }
        self.pending.clear();
        self.phase = SessionPhase::Playing;
        self.sink.emit(GameEvent::CardsMismatched { first, second });
        true
    }

    fn win(&mut self) {
        self.phase = SessionPhase::Won;
        self.timers.clear();
        if let Some(started) = self.play_started_at {
            self.stats.play_time = self.timers.now().saturating_sub(started);
        }
        info!(
            generation = self.generation,
            matches = self.stats.matches,
            mismatches = self.stats.mismatches,
            rank = self.stats.rank().as_str(),
            "game won"
        );
        self.sink.emit(GameEvent::GameWon { stats: self.stats });
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn card(&self, index: usize) -> Option<&Card> {
        self.grid.get(index)
    }

    pub fn pending(&self) -> &PendingSelection {
        &self.pending
    }

    pub fn active_cards(&self) -> usize {
        self.grid.active()
    }

    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    /// Mis-taps during the current game. Diagnostic only.
    pub fn rejected_selections(&self) -> u32 {
        self.rejected
    }

    pub fn is_won(&self) -> bool {
        self.phase == SessionPhase::Won
    }

    /// Current position of the virtual clock.
    pub fn now(&self) -> Duration {
        self.timers.now()
    }

    /// Time until the next queued timer, if any.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            generation: self.generation,
            phase: self.phase,
            rows: self.config.rows,
            columns: self.config.columns,
            active_cards: self.grid.active(),
            cards: self
                .grid
                .cards()
                .iter()
                .enumerate()
                .map(|(index, card)| CardSnapshot {
                    index,
                    symbol: card.symbol().clone(),
                    state: card.state(),
                    interactable: card.is_interactable(),
                })
                .collect(),
            pending: [self.pending.first(), self.pending.pair().map(|(_, second)| second)]
                .into_iter()
                .flatten()
                .collect(),
            stats: self.stats,
        }
    }

    pub fn sink(&self) -> &E {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut E {
        &mut self.sink
    }

    pub fn into_sink(self) -> E {
        self.sink
    }
}
