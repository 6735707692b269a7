use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Text-detection client configuration
#[derive(Debug, Clone)]
pub struct OcrConfig {
    pub api_key: String,
    pub endpoint: String,
    pub timeout_secs: u64,
}

pub const DEFAULT_ENDPOINT: &str = "https://vision.googleapis.com/v1/images:annotate";

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: 30,
        }
    }
}

impl OcrConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }
}

/// One recognized text block with its bounding polygon
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OcrAnnotation {
    pub text: String,
    pub bounding_box: Vec<(i32, i32)>,
}

/// Per-page record written into the OCR artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageRecord {
    pub payee: Option<String>,
    pub amount: Option<String>,
    pub image_path: PathBuf,
    pub ocr_data: Vec<OcrAnnotation>,
}

/// Errors from the text-detection client
#[derive(Error, Debug)]
pub enum OcrError {
    #[error("OCR client not configured: GOOGLE_VISION_API_KEY must be set")]
    NotConfigured,

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("API returned error: {0}")]
    ServerError(String),
}

impl From<reqwest::Error> for OcrError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            OcrError::Timeout
        } else if err.is_decode() {
            OcrError::ParseError(err.to_string())
        } else {
            OcrError::NetworkError(err.to_string())
        }
    }
}
