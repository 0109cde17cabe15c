//! Game core: the session state machine and the types it hands to the render layer.

pub mod config;
pub mod error;
pub mod events;
pub mod session;
pub mod state;
pub mod stats;
pub mod timers;

pub use config::GameConfig;
pub use error::{ConfigError, InvalidSelection};
pub use events::{CardView, EventLog, EventSink, GameEvent};
pub use session::{CardSnapshot, GameSession, SelectOutcome, SessionSnapshot};
pub use state::{Card, CardState, Grid, PendingSelection, SessionPhase, Symbol};
pub use stats::{Rank, RunStats};
pub use timers::{TimerKind, TimerQueue, TimerToken};
