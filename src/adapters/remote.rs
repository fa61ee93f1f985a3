//! Hosted explanation endpoint client.
//!
//! Endpoint: POST /v1/explain
//! Auth: Bearer token

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{Adapter, AdapterOutput};

/// Client for a hosted doubt-explanation endpoint
pub struct RemoteTutorClient {
    endpoint: String,
    token: String,
    client: reqwest::Client,
}

/// Payload for the explanation request
#[derive(Debug, Serialize)]
pub struct ExplainPayload {
    /// The fully rendered tutor prompt
    pub prompt: String,
}

/// Response from the explanation endpoint
#[derive(Debug, Deserialize)]
pub struct ExplainResponse {
    pub explanation: String,
    #[serde(default)]
    pub tokens_used: Option<u64>,
    #[serde(default)]
    pub cost_usd: Option<f64>,
}

impl RemoteTutorClient {
    /// Create a new client
    pub fn new(endpoint: String, token: String) -> Self {
        Self {
            endpoint,
            token,
            client: reqwest::Client::new(),
        }
    }

    /// Create from an endpoint plus the token environment variable
    pub fn from_endpoint(endpoint: impl Into<String>) -> Result<Self> {
        let token = std::env::var("STUDYHUB_TUTOR_TOKEN")
            .context("STUDYHUB_TUTOR_TOKEN environment variable required")?;
        Ok(Self::new(endpoint.into(), token))
    }

    async fn post_prompt(&self, prompt: &str, timeout: Duration) -> Result<ExplainResponse> {
        let payload = ExplainPayload {
            prompt: prompt.to_string(),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .timeout(timeout)
            .json(&payload)
            .send()
            .await
            .with_context(|| format!("Failed to reach tutor endpoint: {}", self.endpoint))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Tutor endpoint returned {}: {}", status, body.trim());
        }

        response
            .json::<ExplainResponse>()
            .await
            .context("Failed to parse tutor endpoint response")
    }
}

#[async_trait]
impl Adapter for RemoteTutorClient {
    fn name(&self) -> &str {
        "remote-tutor"
    }

    async fn execute(&self, prompt: &str, timeout: Duration) -> Result<AdapterOutput> {
        let response = self.post_prompt(prompt, timeout).await?;
        Ok(AdapterOutput {
            content: response.explanation,
            tokens_used: response.tokens_used,
            cost_usd: response.cost_usd,
        })
    }

    async fn health_check(&self) -> Result<()> {
        // HEAD against the endpoint; auth errors still prove reachability
        let response = self
            .client
            .head(&self.endpoint)
            .timeout(Duration::from_secs(5))
            .send()
            .await
            .with_context(|| format!("Tutor endpoint unreachable: {}", self.endpoint))?;

        if response.status().is_server_error() {
            anyhow::bail!("Tutor endpoint unhealthy: {}", response.status());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_serialization() {
        let payload = ExplainPayload {
            prompt: "Course: **Calculus I**".to_string(),
        };
        let json = serde_json::to_string(&payload).unwrap();
        assert!(json.contains("\"prompt\""));
    }

    #[test]
    fn test_response_parsing_defaults() {
        let json = r###"{"explanation": "## Limits ✨"}"###;
        let response: ExplainResponse = serde_json::from_str(json).unwrap();
        assert!(response.explanation.starts_with("## Limits"));
        assert!(response.tokens_used.is_none());
        assert!(response.cost_usd.is_none());
    }
}
