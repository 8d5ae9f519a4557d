pub mod engine;
pub mod parser;
pub mod vision;

// Re-export main types
pub use engine::TextRecognizer;
pub use parser::{extract_name, product_name};
pub use vision::VisionClient;

#[derive(thiserror::Error, Debug)]
pub enum OcrError {
    #[error("Vision API key is not configured")]
    MissingApiKey,
    #[error("Failed to create HTTP client: {0}")]
    Client(reqwest::Error),
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("OCR server error ({status}): {body}")]
    Status { status: u16, body: String },
    #[error("Vision API error: {0}")]
    Api(String),
    #[error("Failed to decode image: {0}")]
    ImageDecode(#[from] base64::DecodeError),
}
