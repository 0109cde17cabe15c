//! Render-side helpers. Nothing here touches session internals; the board is
//! rebuilt from [`crate::game::GameEvent`]s.

pub mod board;
pub mod hud;
