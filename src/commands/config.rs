use crate::models::config::AppConfig;
use crate::services::config::ConfigManager;
use parking_lot::Mutex;

/// State wrapper for configuration manager
pub type ConfigManagerState = Mutex<ConfigManager>;

/// Initialize config manager state
pub fn init_config_manager() -> Result<ConfigManagerState, String> {
    let manager = ConfigManager::new().map_err(|e| e.to_string())?;
    Ok(Mutex::new(manager))
}

/// Save full configuration
pub fn save_config(state: &ConfigManagerState, config: AppConfig) -> Result<(), String> {
    let manager = state.lock();
    manager.save(&config).map_err(|e| e.to_string())
}

/// Load configuration with environment overrides applied
pub fn load_config(state: &ConfigManagerState) -> Result<AppConfig, String> {
    let manager = state.lock();
    manager.load_effective().map_err(|e| e.to_string())
}

/// Store a new Vision API key, keeping the rest of the file
pub fn set_vision_api_key(state: &ConfigManagerState, api_key: String) -> Result<(), String> {
    let manager = state.lock();

    let mut config = manager.load().map_err(|e| e.to_string())?;
    config.vision.api_key = api_key.trim().to_string();

    manager.save(&config).map_err(|e| e.to_string())
}

/// Get config file path
pub fn get_config_path(state: &ConfigManagerState) -> String {
    let manager = state.lock();
    manager.config_file_path().to_string_lossy().to_string()
}
