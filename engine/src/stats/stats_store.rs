use serde::{Deserialize, Serialize};

use crate::config::{ConfigSerializer, ContentProvider, YamlConfigSerializer};
use crate::error::EngineError;
use crate::log;
use crate::tictactoe::{Mark, Outcome};

pub const STATS_KEY: &str = "tictactoeStats";

/// Results from the human's side of player-vs-bot games.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
}

impl Stats {
    /// The human plays X.
    pub fn record(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Win(line) if line.mark == Mark::X => self.wins = self.wins.saturating_add(1),
            Outcome::Win(_) => self.losses = self.losses.saturating_add(1),
            Outcome::Draw => self.draws = self.draws.saturating_add(1),
            Outcome::InProgress => {}
        }
    }

    pub fn games_played(&self) -> u64 {
        u64::from(self.wins) + u64::from(self.losses) + u64::from(self.draws)
    }
}

pub struct StatsStore {
    provider: Box<dyn ContentProvider>,
    serializer: YamlConfigSerializer,
}

impl StatsStore {
    pub fn new(provider: impl ContentProvider + 'static) -> Self {
        Self {
            provider: Box::new(provider),
            serializer: YamlConfigSerializer,
        }
    }

    pub fn try_load(&self) -> Result<Stats, EngineError> {
        match self.provider.read(STATS_KEY).map_err(EngineError::Storage)? {
            Some(content) => {
                let parsed: Result<Stats, String> = self.serializer.deserialize(&content);
                parsed.map_err(EngineError::CorruptPersistedState)
            }
            None => Ok(Stats::default()),
        }
    }

    /// Never fails: unreadable or corrupt records come back zeroed.
    pub fn load(&self) -> Stats {
        match self.try_load() {
            Ok(stats) => stats,
            Err(e @ EngineError::CorruptPersistedState(_)) => {
                log!("{}; resetting stats to zero", e);
                let stats = Stats::default();
                if let Err(e) = self.save(&stats) {
                    log!("Failed to overwrite corrupt stats: {}", e);
                }
                stats
            }
            Err(e) => {
                log!("Failed to load stats: {}", e);
                Stats::default()
            }
        }
    }

    pub fn save(&self, stats: &Stats) -> Result<(), EngineError> {
        let content = self.serializer.serialize(stats).map_err(EngineError::Storage)?;
        self.provider.write(STATS_KEY, &content).map_err(EngineError::Storage)
    }
}
