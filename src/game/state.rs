use std::fmt;

use serde::{Deserialize, Serialize};

/// The value hidden under a card. Every symbol on a grid sits under exactly two cards.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    pub fn new(value: impl Into<String>) -> Self {
        Symbol(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Symbol {
    fn from(value: &str) -> Self {
        Symbol::new(value)
    }
}

impl From<String> for Symbol {
    fn from(value: String) -> Self {
        Symbol(value)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardState {
    Hidden,
    FaceUp,
    Matched,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Card {
    symbol: Symbol,
    pub(super) state: CardState,
    pub(super) interactable: bool,
}

impl Card {
    pub(super) fn new(symbol: Symbol) -> Self {
        Card {
            symbol,
            state: CardState::Hidden,
            interactable: false,
        }
    }

    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    pub fn state(&self) -> CardState {
        self.state
    }

    pub fn is_interactable(&self) -> bool {
        self.interactable
    }

    pub fn is_matched(&self) -> bool {
        self.state == CardState::Matched
    }
}

/// Cards in row-major order. The cell count is always even.
#[derive(Clone, Debug, Default)]
pub struct Grid {
    rows: usize,
    columns: usize,
    cards: Vec<Card>,
    active: usize,
}

impl Grid {
    /// `symbols` must hold exactly `rows * columns` entries, in row-major order.
    pub(super) fn from_symbols(rows: usize, columns: usize, symbols: Vec<Symbol>) -> Self {
        debug_assert_eq!(rows * columns, symbols.len());
        let cards: Vec<Card> = symbols.into_iter().map(Card::new).collect();
        let active = cards.len();
        Grid {
            rows,
            columns,
            cards,
            active,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards that have not been matched yet.
    pub fn active(&self) -> usize {
        self.active
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn get(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    pub(super) fn card_mut(&mut self, index: usize) -> &mut Card {
        &mut self.cards[index]
    }

    pub fn position(&self, index: usize) -> Option<(usize, usize)> {
        if index >= self.cards.len() || self.columns == 0 {
            return None;
        }
        Some((index / self.columns, index % self.columns))
    }

    pub fn index_of(&self, row: usize, column: usize) -> Option<usize> {
        if row >= self.rows || column >= self.columns {
            return None;
        }
        Some(row * self.columns + column)
    }

    pub(super) fn set_all_interactable(&mut self, interactable: bool) {
        for card in &mut self.cards {
            if card.state != CardState::Matched {
                card.interactable = interactable;
            }
        }
    }

    pub(super) fn mark_matched(&mut self, index: usize) {
        let card = &mut self.cards[index];
        if card.state != CardState::Matched {
            card.state = CardState::Matched;
            card.interactable = false;
            self.active = self.active.saturating_sub(1);
        }
    }
}

/// Face-up cards waiting for match resolution. Holds at most two.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PendingSelection {
    first: Option<usize>,
    second: Option<usize>,
}

impl PendingSelection {
    pub fn len(&self) -> usize {
        self.first.is_some() as usize + self.second.is_some() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.first.is_none()
    }

    pub fn is_full(&self) -> bool {
        self.second.is_some()
    }

    pub fn first(&self) -> Option<usize> {
        self.first
    }

    pub fn pair(&self) -> Option<(usize, usize)> {
        Some((self.first?, self.second?))
    }

    pub fn contains(&self, index: usize) -> bool {
        self.first == Some(index) || self.second == Some(index)
    }

    /// Returns false when both slots are taken.
    pub(super) fn push(&mut self, index: usize) -> bool {
        if self.first.is_none() {
            self.first = Some(index);
            true
        } else if self.second.is_none() {
            self.second = Some(index);
            true
        } else {
            false
        }
    }

    pub(super) fn clear(&mut self) {
        self.first = None;
        self.second = None;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    #[default]
    NotStarted,
    Memorizing,
    Playing,
    Resolving,
    Won,
}

impl SessionPhase {
    pub fn name(self) -> &'static str {
        match self {
            SessionPhase::NotStarted => "not started",
            SessionPhase::Memorizing => "memorizing",
            SessionPhase::Playing => "playing",
            SessionPhase::Resolving => "resolving",
            SessionPhase::Won => "won",
        }
    }
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
