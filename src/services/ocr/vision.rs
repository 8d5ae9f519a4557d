use super::{OcrError, TextRecognizer};
use crate::models::config::VisionConfig;
use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Google Cloud Vision `images:annotate` client
#[derive(Clone)]
pub struct VisionClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    feature_type: String,
}

#[derive(Serialize, Debug)]
struct AnnotateRequest {
    requests: Vec<AnnotateImageRequest>,
}

#[derive(Serialize, Debug)]
struct AnnotateImageRequest {
    image: ImageContent,
    features: Vec<Feature>,
}

#[derive(Serialize, Debug)]
struct ImageContent {
    content: String,
}

#[derive(Serialize, Debug)]
struct Feature {
    #[serde(rename = "type")]
    kind: String,
}

#[derive(Deserialize, Debug, Default)]
struct AnnotateResponse {
    #[serde(default)]
    responses: Vec<AnnotateImageResponse>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
struct AnnotateImageResponse {
    full_text_annotation: Option<FullTextAnnotation>,
    #[serde(default)]
    text_annotations: Vec<EntityAnnotation>,
    error: Option<ApiStatus>,
}

#[derive(Deserialize, Debug, Default)]
struct FullTextAnnotation {
    #[serde(default)]
    text: String,
}

#[derive(Deserialize, Debug, Default)]
struct EntityAnnotation {
    #[serde(default)]
    description: String,
}

#[derive(Deserialize, Debug, Default)]
struct ApiStatus {
    #[serde(default)]
    code: i32,
    #[serde(default)]
    message: String,
}

impl AnnotateResponse {
    /// Full text of the first image: `fullTextAnnotation.text`, falling back
    /// to the first `textAnnotations` description
    fn into_text(self) -> Result<String, OcrError> {
        let Some(first) = self.responses.into_iter().next() else {
            return Ok(String::new());
        };

        if let Some(status) = first.error {
            return Err(OcrError::Api(format!("{} (code {})", status.message, status.code)));
        }

        if let Some(full) = first.full_text_annotation {
            if !full.text.is_empty() {
                return Ok(full.text);
            }
        }

        Ok(first
            .text_annotations
            .into_iter()
            .next()
            .map(|a| a.description)
            .unwrap_or_default())
    }
}

impl VisionClient {
    /// Create a new Vision client from configuration
    pub fn new(config: &VisionConfig) -> Result<Self, OcrError> {
        if config.api_key.trim().is_empty() {
            return Err(OcrError::MissingApiKey);
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(OcrError::Client)?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
            feature_type: config.feature_type.clone(),
        })
    }

    fn build_request(&self, image: &[u8]) -> AnnotateRequest {
        AnnotateRequest {
            requests: vec![AnnotateImageRequest {
                image: ImageContent {
                    content: general_purpose::STANDARD.encode(image),
                },
                features: vec![Feature {
                    kind: self.feature_type.clone(),
                }],
            }],
        }
    }

    /// Send one annotate request and return the recognized text.
    /// Single attempt, no retry.
    pub async fn annotate(&self, image: &[u8]) -> Result<String, OcrError> {
        debug!(bytes = image.len(), "Sending image to Vision API");

        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(&self.build_request(image))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            warn!(status = status.as_u16(), "Vision API returned an error status");
            return Err(OcrError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let data: AnnotateResponse = response.json().await?;
        data.into_text()
    }
}

#[async_trait]
impl TextRecognizer for VisionClient {
    async fn recognize(&self, image: &[u8]) -> Result<String, OcrError> {
        self.annotate(image).await
    }
}
