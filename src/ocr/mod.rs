mod client;
mod convert;
mod pipeline;
mod types;

pub use client::{TextDetector, VisionClient};
pub use convert::{pdf_to_images, ConvertError};
pub use pipeline::{receipt_fields, OcrPipeline, OcrSummary, OutputLayout, PipelineError, ProcessOutcome};
pub use types::{OcrAnnotation, OcrConfig, OcrError, PageRecord, DEFAULT_ENDPOINT};

use std::env;

/// Environment variable holding the text-detection API key
pub const ENV_VISION_API_KEY: &str = "GOOGLE_VISION_API_KEY";

/// Environment variable overriding the annotate endpoint (mainly for tests)
pub const ENV_VISION_ENDPOINT: &str = "GOOGLE_VISION_ENDPOINT";

/// Load OCR configuration from environment variables.
///
/// `GOOGLE_VISION_API_KEY` is required for the client to be configured; both
/// variables can be set in a `.env` file in the working directory.
pub fn config_from_env() -> OcrConfig {
    let api_key = env::var(ENV_VISION_API_KEY).unwrap_or_default();
    let endpoint =
        env::var(ENV_VISION_ENDPOINT).unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());

    OcrConfig {
        api_key,
        endpoint,
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to serialize env var tests (they share global state)
    static ENV_TEST_MUTEX: Mutex<()> = Mutex::new(());

    #[test]
    fn test_config_from_env_defaults() {
        let _lock = ENV_TEST_MUTEX.lock().unwrap();

        env::remove_var(ENV_VISION_API_KEY);
        env::remove_var(ENV_VISION_ENDPOINT);

        let config = config_from_env();

        assert!(config.api_key.is_empty());
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert!(!config.is_configured());
    }

    #[test]
    fn test_config_from_env_with_values() {
        let _lock = ENV_TEST_MUTEX.lock().unwrap();

        env::set_var(ENV_VISION_API_KEY, "testkey");
        env::set_var(ENV_VISION_ENDPOINT, "http://localhost:9999/annotate");

        let config = config_from_env();

        assert_eq!(config.api_key, "testkey");
        assert_eq!(config.endpoint, "http://localhost:9999/annotate");
        assert!(config.is_configured());

        // Cleanup
        env::remove_var(ENV_VISION_API_KEY);
        env::remove_var(ENV_VISION_ENDPOINT);
    }
}
