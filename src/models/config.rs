use serde::{Deserialize, Serialize};

/// Environment variable that overrides the configured Vision API key
pub const API_KEY_ENV: &str = "RESTOCK_VISION_API_KEY";

const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Google Cloud Vision settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct VisionConfig {
    pub api_key: String,
    pub endpoint: String,
    pub feature_type: String,
    pub timeout_secs: u64,
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            endpoint: "https://vision.googleapis.com/v1/images:annotate".to_string(),
            feature_type: "TEXT_DETECTION".to_string(),
            timeout_secs: 15,
        }
    }
}

/// Log output settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct AppConfig {
    pub vision: VisionConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Apply environment overrides on top of the loaded file
    pub fn with_env_overrides(self) -> Self {
        let key = std::env::var(API_KEY_ENV).ok();
        self.with_api_key_override(key)
    }

    fn with_api_key_override(mut self, key: Option<String>) -> Self {
        if let Some(key) = key.filter(|k| !k.trim().is_empty()) {
            self.vision.api_key = key.trim().to_string();
        }
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.vision.endpoint.trim().is_empty() {
            return Err("Vision endpoint must not be empty".to_string());
        }

        if self.vision.timeout_secs == 0 {
            return Err("Vision timeout must be at least 1 second".to_string());
        }

        let level = self.logging.level.to_ascii_lowercase();
        if !VALID_LOG_LEVELS.contains(&level.as_str()) {
            return Err(format!("Invalid log level: {}", self.logging.level));
        }

        Ok(())
    }
}
