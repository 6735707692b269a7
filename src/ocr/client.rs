use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::types::{OcrAnnotation, OcrConfig, OcrError};

/// Detects text in an image. Implemented by the HTTP client and by test
/// stubs, so the pipeline never depends on a live endpoint.
pub trait TextDetector {
    fn detect_text(&self, image: &[u8]) -> Result<Vec<OcrAnnotation>, OcrError>;
}

/// Cloud text-detection client speaking the images:annotate REST protocol
pub struct VisionClient {
    client: Client,
    config: OcrConfig,
}

#[derive(Serialize)]
struct AnnotateRequest {
    requests: Vec<ImageRequest>,
}

#[derive(Serialize)]
struct ImageRequest {
    image: ImageContent,
    features: Vec<Feature>,
}

#[derive(Serialize)]
struct ImageContent {
    content: String,
}

#[derive(Serialize)]
struct Feature {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Deserialize)]
struct AnnotateResponse {
    #[serde(default)]
    responses: Vec<PageResponse>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageResponse {
    #[serde(default)]
    text_annotations: Vec<TextAnnotation>,
    error: Option<ApiStatus>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TextAnnotation {
    #[serde(default)]
    description: String,
    bounding_poly: Option<BoundingPoly>,
}

#[derive(Deserialize)]
struct BoundingPoly {
    #[serde(default)]
    vertices: Vec<Vertex>,
}

// The API omits zero-valued coordinates
#[derive(Deserialize)]
struct Vertex {
    #[serde(default)]
    x: i32,
    #[serde(default)]
    y: i32,
}

#[derive(Deserialize)]
struct ApiStatus {
    #[serde(default)]
    code: i32,
    #[serde(default)]
    message: String,
}

impl VisionClient {
    /// Create a new client with the given configuration
    pub fn new(config: OcrConfig) -> Result<Self, OcrError> {
        if !config.is_configured() {
            return Err(OcrError::NotConfigured);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .gzip(true)
            .user_agent(format!("receiptfix/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| OcrError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn annotate(&self, image: &[u8]) -> Result<PageResponse, OcrError> {
        let request = AnnotateRequest {
            requests: vec![ImageRequest {
                image: ImageContent {
                    content: BASE64.encode(image),
                },
                features: vec![Feature {
                    kind: "TEXT_DETECTION",
                }],
            }],
        };

        let url = format!("{}?key={}", self.config.endpoint, self.config.api_key);

        debug!(bytes = image.len(), "Sending text-detection request");

        let response = self.client.post(&url).json(&request).send()?;
        let status = response.status();

        debug!("Response status: {}", status);

        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(OcrError::ServerError(format!("HTTP {}: {}", status, body)));
        }

        let mut parsed: AnnotateResponse = response.json()?;

        if parsed.responses.is_empty() {
            return Err(OcrError::ParseError(
                "Empty annotate response".to_string(),
            ));
        }

        let page = parsed.responses.remove(0);

        if let Some(err) = &page.error {
            return Err(OcrError::ServerError(format!(
                "{} (code {})",
                err.message, err.code
            )));
        }

        Ok(page)
    }
}

impl TextDetector for VisionClient {
    fn detect_text(&self, image: &[u8]) -> Result<Vec<OcrAnnotation>, OcrError> {
        let page = self.annotate(image)?;

        let annotations = page
            .text_annotations
            .into_iter()
            .map(|annotation| OcrAnnotation {
                text: annotation.description,
                bounding_box: annotation
                    .bounding_poly
                    .map(|poly| poly.vertices.iter().map(|v| (v.x, v.y)).collect())
                    .unwrap_or_default(),
            })
            .collect();

        Ok(annotations)
    }
}
