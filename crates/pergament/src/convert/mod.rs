//! External document-to-text conversion tool.
//!
//! Wraps the external converter (a pdfminer-style `pdf2txt.py` by default)
//! that turns a document file into a positioned-text XML stream on stdout.
//! The stream is parsed downstream into page layouts for the tool fallback
//! stage and table reconstruction.

use crate::config::ExtractionConfig;
use crate::error::{PergamentError, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

/// RAII guard for a temporary file, removed on drop on every exit path.
pub(crate) struct TempFile {
    path: PathBuf,
}

impl TempFile {
    /// Write `data` to a fresh uniquely named file in the system temp
    /// directory.
    pub(crate) async fn create(data: &[u8], extension: &str) -> std::io::Result<Self> {
        let path = std::env::temp_dir().join(format!(
            "pergament_{}_{}.{}",
            std::process::id(),
            uuid::Uuid::new_v4(),
            extension
        ));
        tokio::fs::write(&path, data).await?;
        Ok(Self { path })
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempFile {
    fn drop(&mut self) {
        // Best-effort blocking remove; Drop can't be async.
        let _ = std::fs::remove_file(&self.path);
    }
}

/// Handle on the external layout conversion command.
#[derive(Debug, Clone)]
pub struct LayoutTool {
    command: String,
    timeout: Duration,
}

impl LayoutTool {
    pub fn new(command: impl Into<String>, timeout: Duration) -> Self {
        Self {
            command: command.into(),
            timeout,
        }
    }

    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new(&config.layout_tool_command, config.subprocess_timeout())
    }

    /// Convert document bytes into the tool's XML stream.
    ///
    /// The bytes are spooled to a temporary file that is removed whether the
    /// tool succeeds, fails, or the future is dropped mid-flight.
    pub async fn convert(&self, data: &[u8]) -> Result<String> {
        let temp = TempFile::create(data, "pdf").await?;

        let child = Command::new(&self.command)
            .arg("-t")
            .arg("xml")
            .arg(temp.path())
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                std::io::Error::other(format!("failed to execute {}: {}", self.command, e))
            })?;

        let output = match timeout(self.timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                return Err(
                    std::io::Error::other(format!("failed to wait for {}: {}", self.command, e))
                        .into(),
                );
            }
            Err(_) => {
                return Err(PergamentError::parsing(format!(
                    "{} timed out after {} seconds",
                    self.command,
                    self.timeout.as_secs()
                )));
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);

            let stderr_lower = stderr.to_lowercase();
            if stderr_lower.contains("format")
                || stderr_lower.contains("unsupported")
                || stderr_lower.contains("error:")
                || stderr_lower.contains("failed")
            {
                return Err(PergamentError::parsing(format!(
                    "{} conversion error: {}",
                    self.command,
                    stderr.trim()
                )));
            }

            return Err(std::io::Error::other(format!(
                "{} exited with {}: {}",
                self.command,
                output.status,
                stderr.trim()
            ))
            .into());
        }

        debug!(
            command = %self.command,
            bytes = output.stdout.len(),
            "layout conversion produced output"
        );

        String::from_utf8(output.stdout).map_err(|e| {
            PergamentError::parsing(format!("failed to decode {} output: {}", self.command, e))
        })
    }
}
