use crate::commands::list::ListScreenState;
use crate::models::config::VisionConfig;
use crate::models::scan_result::ScanOutcome;
use crate::services::ocr::{OcrError, VisionClient};
use base64::Engine as _;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::info;

/// State wrapper for OCR service (Arc for async sharing, parking_lot::Mutex for reconfiguration)
pub type OcrServiceState = Arc<Mutex<OcrService>>;

/// OCR service backed by Google Cloud Vision
pub struct OcrService {
    pub vision_client: VisionClient, // Public for cloning in async tasks
}

impl OcrService {
    pub fn new(config: &VisionConfig) -> Result<Self, OcrError> {
        info!(endpoint = %config.endpoint, "Initializing OCR service");
        Ok(Self {
            vision_client: VisionClient::new(config)?,
        })
    }
}

/// Initialize OCR service state
pub fn init_ocr_service(config: &VisionConfig) -> Result<OcrServiceState, String> {
    let service = OcrService::new(config).map_err(|e| e.to_string())?;
    Ok(Arc::new(Mutex::new(service)))
}

/// Rebuild the Vision client after a config change
pub fn reload_ocr_service(state: &OcrServiceState, config: &VisionConfig) -> Result<(), String> {
    let service = OcrService::new(config).map_err(|e| e.to_string())?;
    *state.lock() = service;
    Ok(())
}

/// Decode base64 image bytes, accepting an optional `data:...;base64,` prefix
fn decode_base64_image(base64_data: &str) -> Result<Vec<u8>, OcrError> {
    let payload = match base64_data.split_once(";base64,") {
        Some((prefix, data)) if prefix.starts_with("data:") => data,
        _ => base64_data,
    };

    let bytes = base64::engine::general_purpose::STANDARD.decode(payload.trim())?;
    Ok(bytes)
}

/// Scan a base64-encoded photo and merge the recognized product into the list
pub async fn scan_image(
    ocr: &OcrServiceState,
    list: &ListScreenState,
    image_base64: String,
) -> Result<ScanOutcome, String> {
    let vision_client = {
        let service = ocr.lock();
        service.vision_client.clone()
    };
    let image = decode_base64_image(&image_base64).map_err(|e| e.to_string())?;
    Ok(list.scan(&vision_client, &image).await)
}
