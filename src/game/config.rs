use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use super::state::Symbol;

const CONFIG_FILE_NAME: &str = "config.json";

pub const DEFAULT_ROWS: usize = 5;
pub const DEFAULT_COLUMNS: usize = 4;
pub const DEFAULT_MEMORIZE_SECS: f64 = 2.0;
pub const DEFAULT_MATCH_DELAY_SECS: f64 = 0.25;
pub const DEFAULT_MISMATCH_DELAY_SECS: f64 = 1.0;

pub const DEFAULT_SYMBOLS: [&str; 16] = [
    "🍏", "🍐", "🍋", "🍌", "🍉", "🍇", "🍓", "🫐", "🍒", "🍑", "🥭", "🍍", "🥥", "🥝", "🍅", "🍆",
];

/// Construction-time settings for a game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub rows: usize,
    pub columns: usize,
    pub symbols: Vec<Symbol>,
    pub memorize_secs: f64,
    pub match_delay_secs: f64,
    pub mismatch_delay_secs: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            rows: DEFAULT_ROWS,
            columns: DEFAULT_COLUMNS,
            symbols: DEFAULT_SYMBOLS.iter().map(|s| Symbol::from(*s)).collect(),
            memorize_secs: DEFAULT_MEMORIZE_SECS,
            match_delay_secs: DEFAULT_MATCH_DELAY_SECS,
            mismatch_delay_secs: DEFAULT_MISMATCH_DELAY_SECS,
        }
    }
}

impl GameConfig {
    pub fn new(rows: usize, columns: usize, symbols: impl IntoIterator<Item = impl Into<Symbol>>) -> Self {
        GameConfig {
            rows,
            columns,
            symbols: symbols.into_iter().map(Into::into).collect(),
            ..GameConfig::default()
        }
    }

    pub fn with_memorize_secs(mut self, secs: f64) -> Self {
        self.memorize_secs = secs;
        self
    }

    pub fn with_match_delay_secs(mut self, secs: f64) -> Self {
        self.match_delay_secs = secs;
        self
    }

    pub fn with_mismatch_delay_secs(mut self, secs: f64) -> Self {
        self.mismatch_delay_secs = secs;
        self
    }

    pub fn cell_count(&self) -> usize {
        self.rows * self.columns
    }

    pub fn pair_count(&self) -> usize {
        self.cell_count() / 2
    }

    /// Pool symbols in first-seen order with repeats dropped.
    pub fn distinct_symbols(&self) -> Vec<Symbol> {
        let mut seen = HashSet::new();
        self.symbols
            .iter()
            .filter(|symbol| seen.insert(*symbol))
            .cloned()
            .collect()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.columns == 0 {
            return Err(ConfigError::EmptyDimension);
        }
        if self.cell_count() % 2 != 0 {
            return Err(ConfigError::OddCellCount {
                rows: self.rows,
                columns: self.columns,
            });
        }
        let available = self.distinct_symbols().len();
        if available < self.pair_count() {
            return Err(ConfigError::NotEnoughSymbols {
                needed: self.pair_count(),
                available,
            });
        }
        for (name, value) in [
            ("memorize_secs", self.memorize_secs),
            ("match_delay_secs", self.match_delay_secs),
            ("mismatch_delay_secs", self.mismatch_delay_secs),
        ] {
            if Duration::try_from_secs_f64(value).is_err() {
                return Err(ConfigError::InvalidDuration { name, value });
            }
        }
        Ok(())
    }

    pub fn memorize(&self) -> Duration {
        Duration::from_secs_f64(self.memorize_secs)
    }

    pub fn match_delay(&self) -> Duration {
        Duration::from_secs_f64(self.match_delay_secs)
    }

    pub fn mismatch_delay(&self) -> Duration {
        Duration::from_secs_f64(self.mismatch_delay_secs)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    /// `$HOME/.config/pairs/config.json`, when `HOME` is set.
    pub fn default_path() -> Option<PathBuf> {
        let home = std::env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".config/pairs").join(CONFIG_FILE_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_describe_a_valid_five_by_four_board() {
        let config = GameConfig::default();
        assert_eq!(config.cell_count(), 20);
        assert_eq!(config.pair_count(), 10);
        assert!(config.validate().is_ok());
        assert_eq!(config.match_delay(), Duration::from_millis(250));
        assert_eq!(config.mismatch_delay(), Duration::from_secs(1));
    }

    #[test]
    fn odd_cell_count_is_rejected() {
        let err = GameConfig::new(1, 3, ["a", "b"]).validate().unwrap_err();
        assert!(matches!(err, ConfigError::OddCellCount { rows: 1, columns: 3 }));
    }

    #[test]
    fn zero_dimension_is_rejected() {
        let err = GameConfig::new(0, 2, ["a"]).validate().unwrap_err();
        assert!(matches!(err, ConfigError::EmptyDimension));
    }

    #[test]
    fn repeated_pool_entries_do_not_count_as_distinct() {
        let err = GameConfig::new(2, 2, ["a", "a", "a"]).validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::NotEnoughSymbols {
                needed: 2,
                available: 1
            }
        ));
    }

    #[test]
    fn negative_or_nan_durations_are_rejected() {
        let err = GameConfig::new(1, 2, ["a"])
            .with_mismatch_delay_secs(-1.0)
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidDuration {
                name: "mismatch_delay_secs",
                ..
            }
        ));

        let err = GameConfig::new(1, 2, ["a"])
            .with_memorize_secs(f64::NAN)
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidDuration {
                name: "memorize_secs",
                ..
            }
        ));
    }

    #[test]
    fn durations_beyond_duration_range_are_rejected() {
        let oversized = [
            GameConfig::new(1, 2, ["a"]).with_memorize_secs(1e20),
            GameConfig::new(1, 2, ["a"]).with_match_delay_secs(1e20),
            GameConfig::new(1, 2, ["a"]).with_mismatch_delay_secs(1e20),
        ];
        let names: Vec<&str> = oversized
            .iter()
            .map(|config| match config.validate() {
                Err(ConfigError::InvalidDuration { name, .. }) => name,
                other => panic!("expected InvalidDuration, got {other:?}"),
            })
            .collect();
        assert_eq!(
            names,
            ["memorize_secs", "match_delay_secs", "mismatch_delay_secs"]
        );
    }

    #[test]
    fn json_fills_missing_fields_with_defaults() {
        let config = GameConfig::from_json_str(r#"{ "rows": 2, "columns": 3 }"#).unwrap();
        assert_eq!(config.rows, 2);
        assert_eq!(config.columns, 3);
        assert_eq!(config.symbols.len(), DEFAULT_SYMBOLS.len());
        assert_eq!(config.memorize_secs, DEFAULT_MEMORIZE_SECS);
    }

    #[test]
    fn json_is_validated() {
        let err = GameConfig::from_json_str(r#"{ "rows": 3, "columns": 3 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::OddCellCount { .. }));

        let err = GameConfig::from_json_str("{ rows: 3").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_reports_its_path() {
        let path = Path::new("/nonexistent/pairs/config.json");
        match GameConfig::load(path).unwrap_err() {
            ConfigError::Io { path: reported, .. } => assert_eq!(reported, path),
            other => panic!("unexpected error: {other}"),
        }
    }
}
