use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// The eight symbols dealt by default, one pair each
pub const DEFAULT_SYMBOLS: [&str; 8] = ["🐇", "🫖", "⏱️", "🎩", "🗝️", "🍰", "🌹", "🃏"];

/// Tunables for a memory game. Every field has a default, so a config file
/// only needs the keys it wants to change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Symbol alphabet; each entry becomes one pair.
    pub symbols: Vec<String>,
    /// Points awarded per matched pair.
    pub match_points: u32,
    /// How long a mismatched pair stays face-up.
    pub mismatch_delay_ms: u64,
    /// Game clock cadence.
    pub tick_interval_ms: u64,
    /// Board width in cards.
    pub columns: u16,
    pub title: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            symbols: DEFAULT_SYMBOLS.iter().map(|s| s.to_string()).collect(),
            match_points: 10,
            mismatch_delay_ms: 1000,
            tick_interval_ms: 1000,
            columns: 4,
            title: "Alice Memory".to_string(),
        }
    }
}

impl GameConfig {
    /// Read a JSON config file and validate it.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config: Self = serde_json::from_str(&raw)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if given, otherwise fall back to the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.symbols.is_empty() {
            bail!("config needs at least one symbol");
        }
        let mut seen = HashSet::new();
        for symbol in &self.symbols {
            if !seen.insert(symbol.as_str()) {
                bail!("symbol '{}' appears more than once", symbol);
            }
        }
        let max_score = u64::from(self.match_points) * self.symbols.len() as u64;
        if max_score > u64::from(u32::MAX) {
            bail!(
                "match_points {} is too large for {} pairs",
                self.match_points,
                self.symbols.len()
            );
        }
        if self.mismatch_delay_ms == 0 {
            bail!("mismatch_delay_ms must be greater than zero");
        }
        if self.tick_interval_ms == 0 {
            bail!("tick_interval_ms must be greater than zero");
        }
        if self.columns == 0 {
            bail!("columns must be greater than zero");
        }
        Ok(())
    }

    pub fn mismatch_delay(&self) -> Duration {
        Duration::from_millis(self.mismatch_delay_ms)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Cards on the table once a deck is dealt.
    pub fn deck_size(&self) -> usize {
        self.symbols.len() * 2
    }
}
