//! Tesseract CLI engine.

use super::{OcrEngine, OcrError, OcrResult};
use crate::config::ExtractionConfig;
use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

/// OCR engine driving the `tesseract` executable.
///
/// Recognition runs `tesseract <image> stdout -l <language>`; the installed
/// language set comes from `tesseract --list-langs`.
#[derive(Debug, Clone)]
pub struct TesseractCli {
    command: String,
    timeout: Duration,
}

impl TesseractCli {
    pub fn new(command: impl Into<String>, timeout: Duration) -> Self {
        Self {
            command: command.into(),
            timeout,
        }
    }

    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new(&config.tesseract_command, config.subprocess_timeout())
    }

    async fn run(&self, args: &[&str]) -> OcrResult<std::process::Output> {
        let child = Command::new(&self.command)
            .args(args)
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                OcrError::EngineUnavailable(format!("failed to execute {}: {}", self.command, e))
            })?;

        match timeout(self.timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => Ok(output),
            Ok(Err(e)) => Err(OcrError::Io(e)),
            Err(_) => Err(OcrError::Timeout(self.timeout.as_secs())),
        }
    }
}

#[async_trait]
impl OcrEngine for TesseractCli {
    async fn available_languages(&self) -> OcrResult<Vec<String>> {
        let output = self.run(&["--list-langs"]).await?;
        if !output.status.success() {
            return Err(OcrError::EngineUnavailable(format!(
                "{} --list-langs exited with {}: {}",
                self.command,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        // Tesseract prints the listing on stdout on recent versions and on
        // stderr on some older ones.
        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let listing = if stdout.trim().is_empty() {
            String::from_utf8_lossy(&output.stderr).into_owned()
        } else {
            stdout
        };
        Ok(parse_language_listing(&listing))
    }

    async fn recognize_file(&self, path: &Path, language: &str) -> OcrResult<String> {
        let image = path.to_string_lossy();
        let output = self.run(&[image.as_ref(), "stdout", "-l", language]).await?;

        if !output.status.success() {
            return Err(OcrError::RecognitionFailed(format!(
                "{} exited with {}: {}",
                self.command,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let text = String::from_utf8_lossy(&output.stdout).into_owned();
        debug!(image = %image, language, chars = text.len(), "tesseract recognition finished");
        Ok(text)
    }
}

/// Parse `tesseract --list-langs` output into language codes.
///
/// The listing starts with a header line ("List of available languages ...")
/// followed by one code per line.
fn parse_language_listing(listing: &str) -> Vec<String> {
    listing
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with("List of"))
        .map(ToString::to_string)
        .collect()
}
