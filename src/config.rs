use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::corpus::Difficulty;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_difficulty")]
    pub difficulty: String,
    #[serde(default = "default_sound_enabled")]
    pub sound_enabled: bool,
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_high_score_entries")]
    pub high_score_entries: usize,
}

fn default_difficulty() -> String {
    "easy".to_string()
}
fn default_sound_enabled() -> bool {
    true
}
fn default_theme() -> String {
    "storm-dark".to_string()
}
fn default_high_score_entries() -> usize {
    5
}

impl Default for Config {
    fn default() -> Self {
        Self {
            difficulty: default_difficulty(),
            sound_enabled: default_sound_enabled(),
            theme: default_theme(),
            high_score_entries: default_high_score_entries(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let mut config: Config = toml::from_str(&content)?;
            config.normalize();
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("typestorm")
            .join("config.toml")
    }

    pub fn difficulty(&self) -> Difficulty {
        Difficulty::parse(&self.difficulty).unwrap_or_default()
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty.as_str().to_string();
    }

    /// Clamp stale or hand-edited values back into range.
    pub fn normalize(&mut self) {
        if Difficulty::parse(&self.difficulty).is_none() {
            self.difficulty = default_difficulty();
        }
        self.high_score_entries = self.high_score_entries.clamp(1, 25);
    }
}
