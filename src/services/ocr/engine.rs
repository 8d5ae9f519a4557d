use async_trait::async_trait;

use super::OcrError;

/// Text recognizer abstraction - turns an encoded photo into raw text
#[async_trait]
pub trait TextRecognizer: Send + Sync {
    /// Recognize all text in the image. Empty string means nothing was found.
    async fn recognize(&self, image: &[u8]) -> Result<String, OcrError>;
}
