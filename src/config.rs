//! Application configuration, loaded from TOML.
//!
//! Environment:
//!   ICOOK_CONFIG    : path to a TOML file (optional; defaults apply without it)
//!   ICOOK_DATA_DIR  : overrides `storage.data_dir`
//!
//! Example:
//! ```toml
//! [storage]
//! backend = "sqlite"
//!
//! [quiz]
//! advance_delay_ms = 1500
//! judge_mode = "identifier"
//!
//! [achievements]
//! catalog_size = 12
//!
//! [[achievements.rules]]
//! badge_id = 1
//! trigger = { kind = "challenge_completed", min_pool_size = 1 }
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::{
    default_badge_rules, AchievementCatalog, AchievementDefinition, BadgeRule, JudgeMode,
};
use crate::error::{AppError, AppResult};

pub const CONFIG_PATH_ENV: &str = "ICOOK_CONFIG";
pub const DATA_DIR_ENV: &str = "ICOOK_DATA_DIR";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub quiz: QuizConfig,
    pub achievements: AchievementConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    /// One JSON file per key in the data directory
    #[default]
    File,
    /// Key-value table inside `icook.db`
    Sqlite,
    /// Nothing is written to disk
    Memory,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub data_dir: Option<PathBuf>,
}

impl StorageConfig {
    /// `data_dir` if set, otherwise `{APP_DATA}/icook`
    pub fn resolve_data_dir(&self) -> AppResult<PathBuf> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        let app_data_dir = dirs::data_dir()
            .ok_or_else(|| AppError::Config("Could not determine app data directory".to_string()))?;
        Ok(app_data_dir.join("icook"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizConfig {
    /// Pause between a correct answer and the next recipe
    pub advance_delay_ms: u64,
    pub judge_mode: JudgeMode,
}

impl QuizConfig {
    pub fn advance_delay(&self) -> Duration {
        Duration::from_millis(self.advance_delay_ms)
    }
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            advance_delay_ms: 1500,
            judge_mode: JudgeMode::Identifier,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AchievementConfig {
    /// Size of the generated catalog when `catalog` is empty
    pub catalog_size: u32,
    /// Explicit catalog entries; replaces the generated catalog when present
    pub catalog: Vec<AchievementDefinition>,
    pub rules: Vec<BadgeRule>,
}

impl AchievementConfig {
    pub fn build_catalog(&self) -> AppResult<AchievementCatalog> {
        if self.catalog.is_empty() {
            return Ok(AchievementCatalog::generate(self.catalog_size));
        }
        Ok(AchievementCatalog::from_entries(self.catalog.clone())?)
    }
}

impl Default for AchievementConfig {
    fn default() -> Self {
        Self {
            catalog_size: crate::domain::achievement::DEFAULT_CATALOG_SIZE,
            catalog: Vec::new(),
            rules: default_badge_rules(),
        }
    }
}

impl AppConfig {
    /// Reads `ICOOK_CONFIG` if set, then applies `ICOOK_DATA_DIR`.
    pub fn load() -> AppResult<Self> {
        let mut config = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::load_from_path(Path::new(&path))?,
            Err(_) => {
                log::debug!("{} not set, using default configuration", CONFIG_PATH_ENV);
                Self::default()
            }
        };

        if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
            config.storage.data_dir = Some(PathBuf::from(dir));
        }

        Ok(config)
    }

    pub fn load_from_path(path: &Path) -> AppResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Cannot read config {}: {}", path.display(), e))
        })?;
        let config = Self::from_toml_str(&text)?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn from_toml_str(text: &str) -> AppResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Memory-backed configuration for tests and previews
    pub fn in_memory() -> Self {
        Self {
            storage: StorageConfig {
                backend: StorageBackend::Memory,
                data_dir: None,
            },
            ..Self::default()
        }
    }
}
