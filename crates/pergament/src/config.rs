//! Extraction configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for a single extraction pipeline instance.
///
/// Can be deserialized from a config file or created programmatically.
///
/// # Example
///
/// ```rust
/// use pergament::ExtractionConfig;
///
/// let config = ExtractionConfig {
///     ocr_language: "deu".to_string(),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExtractionConfig {
    /// Language requested from the OCR engine. Falls back to `"eng"` when the
    /// engine does not have the requested language installed.
    #[serde(default = "default_ocr_language")]
    pub ocr_language: String,

    /// External command converting a document file into a positioned-text XML
    /// stream on stdout.
    #[serde(default = "default_layout_tool_command")]
    pub layout_tool_command: String,

    /// Tesseract executable used by the default OCR engine.
    #[serde(default = "default_tesseract_command")]
    pub tesseract_command: String,

    /// Deadline for each external process invocation (layout tool, OCR).
    #[serde(default = "default_subprocess_timeout_secs")]
    pub subprocess_timeout_secs: u64,
}

impl ExtractionConfig {
    pub fn subprocess_timeout(&self) -> Duration {
        Duration::from_secs(self.subprocess_timeout_secs)
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            ocr_language: default_ocr_language(),
            layout_tool_command: default_layout_tool_command(),
            tesseract_command: default_tesseract_command(),
            subprocess_timeout_secs: default_subprocess_timeout_secs(),
        }
    }
}

fn default_ocr_language() -> String {
    crate::ocr::DEFAULT_OCR_LANGUAGE.to_string()
}

fn default_layout_tool_command() -> String {
    "pdf2txt.py".to_string()
}

fn default_tesseract_command() -> String {
    "tesseract".to_string()
}

fn default_subprocess_timeout_secs() -> u64 {
    120
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ExtractionConfig::default();
        assert_eq!(config.ocr_language, "eng");
        assert_eq!(config.layout_tool_command, "pdf2txt.py");
        assert_eq!(config.tesseract_command, "tesseract");
        assert_eq!(config.subprocess_timeout(), Duration::from_secs(120));
    }

    #[test]
    fn test_partial_deserialization_uses_defaults() {
        let config: ExtractionConfig = serde_json::from_str(r#"{"ocr_language": "fra"}"#).unwrap();
        assert_eq!(config.ocr_language, "fra");
        assert_eq!(config.layout_tool_command, "pdf2txt.py");
        assert_eq!(config.subprocess_timeout_secs, 120);
    }
}
