use crate::models::config::AppConfig;
use std::fs;
use std::path::PathBuf;
use tracing::info;

const APP_DIR_NAME: &str = "restock-scanner";

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    NoConfigDir,
    #[error("Config I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Configuration manager for app settings
pub struct ConfigManager {
    config_dir: PathBuf,
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a manager rooted in the platform config directory.
    ///
    /// The directory itself is created lazily on the first save.
    pub fn new() -> Result<Self, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NoConfigDir)?
            .join(APP_DIR_NAME);

        Ok(Self::with_dir(config_dir))
    }

    pub fn with_dir(config_dir: PathBuf) -> Self {
        let config_path = config_dir.join("config.json");
        Self {
            config_dir,
            config_path,
        }
    }

    /// Validate and save configuration to disk
    pub fn save(&self, config: &AppConfig) -> Result<(), ConfigError> {
        config.validate().map_err(ConfigError::Invalid)?;

        fs::create_dir_all(&self.config_dir)?;

        // Pretty print for human readability
        let json = serde_json::to_string_pretty(config)?;
        fs::write(&self.config_path, json)?;

        info!(path = %self.config_path.display(), "Saved configuration");
        Ok(())
    }

    /// Load configuration from disk
    ///
    /// If config file doesn't exist, returns default configuration
    pub fn load(&self) -> Result<AppConfig, ConfigError> {
        if !self.config_exists() {
            return Ok(AppConfig::default());
        }

        let content = fs::read_to_string(&self.config_path)?;
        let config: AppConfig = serde_json::from_str(&content)?;

        Ok(config)
    }

    /// Load from disk, then apply environment overrides
    pub fn load_effective(&self) -> Result<AppConfig, ConfigError> {
        let config = self.load()?.with_env_overrides();
        config.validate().map_err(ConfigError::Invalid)?;
        Ok(config)
    }

    pub fn config_file_path(&self) -> &PathBuf {
        &self.config_path
    }

    pub fn config_exists(&self) -> bool {
        self.config_path.exists()
    }
}
