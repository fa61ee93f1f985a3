//! Adapter interfaces for generative-AI backends.
//!
//! Adapters provide a unified interface for turning a rendered tutor prompt
//! into an explanation, whether through a local LLM CLI or a hosted endpoint.

pub mod llm_cli;
pub mod remote;

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;

pub use llm_cli::LlmCliAdapter;
pub use remote::RemoteTutorClient;

/// Output from an adapter execution
#[derive(Debug, Clone)]
pub struct AdapterOutput {
    /// The content returned by the adapter
    pub content: String,

    /// Tokens used (if available)
    pub tokens_used: Option<u64>,

    /// Cost in USD (if available)
    pub cost_usd: Option<f64>,
}

impl AdapterOutput {
    /// Create a new adapter output with just content
    pub fn new(content: String) -> Self {
        Self {
            content,
            tokens_used: None,
            cost_usd: None,
        }
    }
}

/// Trait for generative-AI backends
#[async_trait]
pub trait Adapter: Send + Sync {
    /// Human-readable adapter name
    fn name(&self) -> &str;

    /// Execute a prompt and return the generated content
    async fn execute(&self, prompt: &str, timeout: Duration) -> Result<AdapterOutput>;

    /// Health check (backend availability)
    async fn health_check(&self) -> Result<()>;
}
