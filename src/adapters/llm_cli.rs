//! Local LLM CLI adapter.
//!
//! Pipes the rendered prompt to a local model CLI over stdin and collects
//! the generated explanation from stdout.

use std::process::Stdio;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::time::timeout;

use super::{Adapter, AdapterOutput};

/// Generative-AI adapter using a local CLI in subprocess mode
pub struct LlmCliAdapter {
    /// Path to the model CLI binary
    binary_path: String,
}

impl Default for LlmCliAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl LlmCliAdapter {
    /// Create a new adapter with default binary discovery
    ///
    /// Looks for fabric-ai first (Homebrew install), falls back to fabric
    pub fn new() -> Self {
        let binary_path = if std::process::Command::new("fabric-ai")
            .arg("--help")
            .output()
            .is_ok()
        {
            "fabric-ai".to_string()
        } else {
            "fabric".to_string()
        };

        Self { binary_path }
    }

    /// Create an adapter with a custom binary path
    pub fn with_binary_path(binary_path: impl Into<String>) -> Self {
        Self {
            binary_path: binary_path.into(),
        }
    }

    /// Execute the prompt via subprocess
    ///
    /// Spawns the binary and pipes the prompt to stdin, collecting output
    /// from stdout.
    async fn execute_subprocess(&self, prompt: &str, step_timeout: Duration) -> Result<String> {
        let mut child = Command::new(&self.binary_path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("Failed to spawn model CLI '{}'", self.binary_path))?;

        // Write prompt to stdin
        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(prompt.as_bytes())
                .await
                .context("Failed to write to model CLI stdin")?;
            // Drop stdin to signal EOF
        }

        // Wait for completion with timeout
        let output = timeout(step_timeout, child.wait_with_output())
            .await
            .with_context(|| {
                format!(
                    "Model CLI '{}' timed out after {:?}",
                    self.binary_path, step_timeout
                )
            })?
            .with_context(|| format!("Failed to wait for model CLI '{}'", self.binary_path))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let exit_code = output.status.code().unwrap_or(-1);
            anyhow::bail!(
                "Model CLI '{}' failed with exit code {}: {}",
                self.binary_path,
                exit_code,
                stderr.trim()
            );
        }

        let stdout =
            String::from_utf8(output.stdout).context("Model CLI output is not valid UTF-8")?;

        Ok(stdout)
    }
}

#[async_trait]
impl Adapter for LlmCliAdapter {
    fn name(&self) -> &str {
        "llm-cli"
    }

    async fn execute(&self, prompt: &str, timeout: Duration) -> Result<AdapterOutput> {
        let content = self.execute_subprocess(prompt, timeout).await?;
        Ok(AdapterOutput::new(content))
    }

    async fn health_check(&self) -> Result<()> {
        let output = Command::new(&self.binary_path)
            .arg("--help")
            .output()
            .await
            .context("Failed to run model CLI health check")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("Model CLI health check failed: {}", stderr);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_adapter_creation() {
        let adapter = LlmCliAdapter::new();
        assert_eq!(adapter.name(), "llm-cli");
    }

    #[tokio::test]
    async fn test_custom_binary_path() {
        let adapter = LlmCliAdapter::with_binary_path("/custom/path/model-cli");
        assert_eq!(adapter.binary_path, "/custom/path/model-cli");
    }

    // Note: integration tests with a real model CLI would go in tests/
}
