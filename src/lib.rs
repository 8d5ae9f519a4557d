pub mod commands;
pub mod models;
pub mod services;

use commands::config::{init_config_manager, load_config, ConfigManagerState};
use commands::list::{init_list_screen, ListScreenState};
use commands::scan::{init_ocr_service, OcrServiceState};
use models::config::LoggingConfig;
use std::str::FromStr;
use tracing::{info, warn, Level};

pub use models::item::{Item, ItemList};
pub use models::scan_result::ScanOutcome;
pub use services::list_merger::{add_manual, merge, remove, set_name, set_qty};
pub use services::ocr::extract_name;

/// Install the global tracing subscriber. Calling it again is a no-op.
pub fn init_tracing(config: &LoggingConfig) {
    let level = Level::from_str(&config.level).unwrap_or(Level::INFO);
    let builder = tracing_subscriber::fmt().with_max_level(level);

    let result = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    if result.is_err() {
        // Subscriber already installed by the host or an earlier call
        return;
    }
    info!(level = %level, json = config.json, "Tracing initialized");
}

/// Everything the host keeps alive for the lifetime of the app
pub struct AppState {
    pub config: ConfigManagerState,
    pub list: ListScreenState,
    /// `None` until a Vision API key is configured
    pub ocr: Option<OcrServiceState>,
}

/// Load configuration, start logging and build the shared state
pub fn init() -> Result<AppState, String> {
    let config_manager = init_config_manager()?;
    let config = load_config(&config_manager)?;

    init_tracing(&config.logging);

    // Non-fatal: the list works without OCR, scanning reports the error
    let ocr = match init_ocr_service(&config.vision) {
        Ok(service) => Some(service),
        Err(e) => {
            warn!(error = %e, "OCR service unavailable");
            None
        }
    };

    Ok(AppState {
        config: config_manager,
        list: init_list_screen(),
        ocr,
    })
}
