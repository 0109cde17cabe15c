use std::time::Duration;

use serde::{Deserialize, Serialize};

const RANK_A_PRECISION: u8 = 85;
const RANK_B_PRECISION: u8 = 70;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum Rank {
    #[default]
    C,
    B,
    A,
    S,
}

impl Rank {
    pub fn as_str(self) -> &'static str {
        match self {
            Rank::S => "S",
            Rank::A => "A",
            Rank::B => "B",
            Rank::C => "C",
        }
    }

    pub fn for_precision(precision_pct: u8) -> Self {
        if precision_pct >= 100 {
            Rank::S
        } else if precision_pct >= RANK_A_PRECISION {
            Rank::A
        } else if precision_pct >= RANK_B_PRECISION {
            Rank::B
        } else {
            Rank::C
        }
    }
}

/// Counters for the current game. Reset by every `start`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    pub matches: u32,
    pub mismatches: u32,
    pub play_time: Duration,
}

impl RunStats {
    pub fn attempts(&self) -> u32 {
        self.matches.saturating_add(self.mismatches)
    }

    pub fn precision_pct(&self) -> u8 {
        let attempts = self.attempts();
        if attempts == 0 {
            100
        } else {
            ((self.matches as f64 / attempts as f64) * 100.0).round() as u8
        }
    }

    pub fn rank(&self) -> Rank {
        Rank::for_precision(self.precision_pct())
    }

    pub fn play_time_label(&self) -> String {
        let total_secs = self.play_time.as_secs();
        format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
    }
}
