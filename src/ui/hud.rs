use std::time::Duration;

use crate::game::{RunStats, SessionPhase};

/// One-line header for the current phase. `memorize_remaining` is only read
/// while memorizing.
pub fn status_line(
    phase: SessionPhase,
    active_cards: usize,
    stats: &RunStats,
    memorize_remaining: Option<Duration>,
) -> String {
    match phase {
        SessionPhase::NotStarted => "Pairs".to_string(),
        SessionPhase::Memorizing => {
            let remain = memorize_remaining.unwrap_or_default().as_secs_f64();
            format!("Pairs | Memorize {:.1}s", remain)
        }
        SessionPhase::Playing | SessionPhase::Resolving => format!(
            "Pairs | {} pairs left | {} found, {} missed",
            active_cards / 2,
            stats.matches,
            stats.mismatches
        ),
        SessionPhase::Won => format!(
            "Victory! | {} | precision {}% | rank {}",
            stats.play_time_label(),
            stats.precision_pct(),
            stats.rank().as_str()
        ),
    }
}
