//! Pairs: a memory-matching game core.
//!
//! [`GameSession`] deals a grid of paired symbols, gates input through the
//! memorize window, resolves picks into matches or mismatches and reports the
//! win. Everything the render layer needs arrives as [`GameEvent`]s; the
//! [`ui::board::BoardMirror`] shows how a collaborator keeps its own view in
//! sync from that stream alone.

pub mod game;
pub mod ui;

pub use game::{
    ConfigError, EventLog, EventSink, GameConfig, GameEvent, GameSession, InvalidSelection,
    SelectOutcome, SessionPhase, Symbol,
};
