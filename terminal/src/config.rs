use serde::{Deserialize, Serialize};
use tictactoe_engine::config::{ConfigManager, FileContentProvider, Validate, YamlConfigSerializer};
use tictactoe_engine::tictactoe::{Difficulty, GameMode};

const MAX_BOT_DELAY_MS: u64 = 10_000;

pub fn get_config_manager(data_dir: &str) -> ConfigManager<FileContentProvider, AppConfig, YamlConfigSerializer> {
    ConfigManager::from_yaml_dir(data_dir)
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub bot_delay_ms: u64,
    pub default_mode: GameMode,
    pub default_difficulty: Difficulty,
    pub bell_on_game_over: bool,
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<(), String> {
        if self.bot_delay_ms > MAX_BOT_DELAY_MS {
            return Err(format!(
                "bot_delay_ms must not exceed {} (got {})",
                MAX_BOT_DELAY_MS, self.bot_delay_ms
            ));
        }
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bot_delay_ms: 800,
            default_mode: GameMode::PlayerVsBot,
            default_difficulty: Difficulty::Hard,
            bell_on_game_over: true,
        }
    }
}
