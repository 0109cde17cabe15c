use serde::{Deserialize, Serialize};

use super::state::Symbol;
use super::stats::RunStats;

/// One card as shown during the memorize window.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardView {
    pub index: usize,
    pub row: usize,
    pub column: usize,
    pub symbol: Symbol,
}

/// Notifications for the render layer. Payloads are owned copies; nothing here
/// points back into the session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    /// Display-only reveal at the start of the memorize window.
    CardsRevealedAll { cards: Vec<CardView> },
    CardsEnabled { indices: Vec<usize> },
    /// A card was turned face up and stopped accepting input.
    CardDisabled { index: usize, symbol: Symbol },
    CardsMatched {
        first: usize,
        second: usize,
        symbol: Symbol,
    },
    CardRemoved { index: usize },
    /// Both cards are face down and selectable again.
    CardsMismatched { first: usize, second: usize },
    GameWon { stats: RunStats },
}

impl GameEvent {
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::CardsRevealedAll { .. } => "cards_revealed_all",
            GameEvent::CardsEnabled { .. } => "cards_enabled",
            GameEvent::CardDisabled { .. } => "card_disabled",
            GameEvent::CardsMatched { .. } => "cards_matched",
            GameEvent::CardRemoved { .. } => "card_removed",
            GameEvent::CardsMismatched { .. } => "cards_mismatched",
            GameEvent::GameWon { .. } => "game_won",
        }
    }
}

pub trait EventSink {
    fn emit(&mut self, event: GameEvent);
}

impl<F> EventSink for F
where
    F: FnMut(GameEvent),
{
    fn emit(&mut self, event: GameEvent) {
        self(event)
    }
}

/// Sink that keeps every event until drained.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Vec<GameEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn count(&self, name: &str) -> usize {
        self.events.iter().filter(|event| event.name() == name).count()
    }
}

impl EventSink for EventLog {
    fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}
