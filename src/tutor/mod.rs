//! AI doubt solver: prompt rendering, request limits, and dispatch.
//!
//! A doubt is a free-text question tied to a course name. The tutor renders
//! a fixed prompt template around it and forwards the result to a
//! generative-AI backend through the adapter layer.

use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::adapters::{Adapter, LlmCliAdapter, RemoteTutorClient};
use crate::config::TutorSettings;

pub mod history;

pub use history::{DoubtEntry, HistoryStore};

/// A student question submitted to the tutor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoubtRequest {
    /// The course the doubt relates to
    pub course: String,

    /// The doubt or question itself
    pub question: String,
}

/// A generated explanation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explanation {
    /// Markdown explanation text
    pub content: String,

    /// Tokens used (if the backend reported it)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokens_used: Option<u64>,

    /// Cost in USD (if the backend reported it)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_usd: Option<f64>,
}

/// Request limit violations, checked before any backend call
#[derive(Debug, Error)]
pub enum LimitViolation {
    #[error("Question is empty")]
    EmptyQuestion,

    #[error("Course name is empty")]
    EmptyCourse,

    #[error("Question too large: {size} bytes (max: {max})")]
    QuestionTooLarge { size: usize, max: usize },
}

/// Validate a doubt request against the configured limits
pub fn check_limits(request: &DoubtRequest, settings: &TutorSettings) -> Result<(), LimitViolation> {
    if request.course.trim().is_empty() {
        return Err(LimitViolation::EmptyCourse);
    }
    if request.question.trim().is_empty() {
        return Err(LimitViolation::EmptyQuestion);
    }

    let size = request.question.len();
    if size > settings.max_question_bytes {
        return Err(LimitViolation::QuestionTooLarge {
            size,
            max: settings.max_question_bytes,
        });
    }

    Ok(())
}

/// Render the tutor prompt for a doubt request
pub fn render_prompt(request: &DoubtRequest) -> String {
    format!(
        r#"You are a friendly and engaging AI Tutor 🎓 specialized in explaining doubts related to various courses. Your goal is to make learning fun and easy to understand!

You will be provided with the course name and the student's doubt. Please provide a clear, structured, and engaging explanation using Markdown.

**Instructions for your response:**
*   **Use Emojis:** Sprinkle relevant emojis throughout your explanation to make it more visually appealing and engaging (e.g., ✨, 💡, 🤔, ✅).
*   **Structured Format:** Organize your explanation with clear headings (using markdown like ## Heading or ### Sub-Heading), bullet points (using * or -), or numbered lists where appropriate. Break down complex ideas into smaller, digestible parts.
*   **Clarity and Conciseness:** While being engaging, ensure your explanation is accurate, easy to understand, and to the point. Use bold text for key terms (e.g., **important concept**).
*   **Positive Tone:** Maintain a positive and encouraging tone.
*   **Example Structure:**
    ## Main Topic Example ✨
    Here is some introductory text about the main topic.
    ### Sub-Topic Example 💡
    *   This is the first bullet point.
    *   This is the second bullet point with a **key term**.
    *   And a third one for good measure ✅.

Course: **{course}**
Doubt: **{doubt}**

Here's a clear and engaging explanation for you:
"#,
        course = request.course.trim(),
        doubt = request.question.trim(),
    )
}

/// The doubt solver, bound to a backend adapter and limits
pub struct Tutor {
    adapter: Box<dyn Adapter>,
    settings: TutorSettings,
}

impl Tutor {
    /// Build a tutor from settings: hosted endpoint when configured,
    /// local model CLI otherwise.
    pub fn from_settings(settings: TutorSettings) -> Result<Self> {
        let adapter: Box<dyn Adapter> = if let Some(ref endpoint) = settings.endpoint {
            Box::new(RemoteTutorClient::from_endpoint(endpoint.clone())?)
        } else if let Some(ref binary) = settings.binary {
            Box::new(LlmCliAdapter::with_binary_path(binary.clone()))
        } else {
            Box::new(LlmCliAdapter::new())
        };

        Ok(Self { adapter, settings })
    }

    /// Build a tutor with an explicit adapter (used by tests)
    pub fn with_adapter(adapter: Box<dyn Adapter>, settings: TutorSettings) -> Self {
        Self { adapter, settings }
    }

    /// Name of the active backend
    pub fn backend(&self) -> &str {
        self.adapter.name()
    }

    /// Probe the backend for availability
    pub async fn health_check(&self) -> Result<()> {
        self.adapter.health_check().await
    }

    /// Solve a doubt: validate, render the prompt, and dispatch
    pub async fn solve(&self, request: &DoubtRequest) -> Result<Explanation> {
        check_limits(request, &self.settings)?;

        let request_id = Uuid::new_v4();
        info!(
            %request_id,
            course = %request.course,
            backend = self.adapter.name(),
            "Dispatching doubt to tutor backend"
        );

        let prompt = render_prompt(request);
        let timeout = Duration::from_secs(self.settings.timeout_seconds);

        let output = self
            .adapter
            .execute(&prompt, timeout)
            .await
            .with_context(|| format!("Tutor backend '{}' failed", self.adapter.name()))?;

        info!(%request_id, bytes = output.content.len(), "Explanation received");

        Ok(Explanation {
            content: output.content,
            tokens_used: output.tokens_used,
            cost_usd: output.cost_usd,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::AdapterOutput;
    use async_trait::async_trait;

    struct CannedAdapter;

    #[async_trait]
    impl Adapter for CannedAdapter {
        fn name(&self) -> &str {
            "canned"
        }

        async fn execute(&self, prompt: &str, _timeout: Duration) -> Result<AdapterOutput> {
            assert!(prompt.contains("Calculus I"));
            Ok(AdapterOutput::new("## Limits ✨\nAn explanation.".to_string()))
        }

        async fn health_check(&self) -> Result<()> {
            Ok(())
        }
    }

    fn request(course: &str, question: &str) -> DoubtRequest {
        DoubtRequest {
            course: course.to_string(),
            question: question.to_string(),
        }
    }

    #[test]
    fn test_prompt_contains_course_and_doubt() {
        let prompt = render_prompt(&request("Calculus I", "What is a derivative?"));

        assert!(prompt.contains("Course: **Calculus I**"));
        assert!(prompt.contains("Doubt: **What is a derivative?**"));
        assert!(prompt.contains("AI Tutor"));
    }

    #[test]
    fn test_prompt_includes_formatting_instructions() {
        let prompt = render_prompt(&request("Calculus I", "What is a derivative?"));

        assert!(prompt.contains("**Use Emojis:**"));
        assert!(prompt.contains("**Structured Format:**"));
        assert!(prompt.contains("**Example Structure:**"));
        assert!(prompt.contains("## Main Topic Example ✨"));
        assert!(prompt.contains("### Sub-Topic Example 💡"));
    }

    #[test]
    fn test_prompt_trims_inputs() {
        let prompt = render_prompt(&request("  Calculus I  ", "  Why?  "));
        assert!(prompt.contains("Course: **Calculus I**"));
        assert!(prompt.contains("Doubt: **Why?**"));
    }

    #[test]
    fn test_limit_checks() {
        let settings = TutorSettings {
            max_question_bytes: 16,
            ..Default::default()
        };

        assert!(matches!(
            check_limits(&request("", "Why?"), &settings),
            Err(LimitViolation::EmptyCourse)
        ));
        assert!(matches!(
            check_limits(&request("Calculus I", "   "), &settings),
            Err(LimitViolation::EmptyQuestion)
        ));
        assert!(matches!(
            check_limits(&request("Calculus I", "A question well over the limit"), &settings),
            Err(LimitViolation::QuestionTooLarge { .. })
        ));
        assert!(check_limits(&request("Calculus I", "Why?"), &settings).is_ok());
    }

    #[tokio::test]
    async fn test_solve_round_trip() {
        let tutor = Tutor::with_adapter(Box::new(CannedAdapter), TutorSettings::default());

        let explanation = tutor
            .solve(&request("Calculus I", "What is a limit?"))
            .await
            .unwrap();

        assert!(explanation.content.contains("Limits"));
        assert!(explanation.tokens_used.is_none());
    }

    #[tokio::test]
    async fn test_solve_rejects_oversized_question() {
        let settings = TutorSettings {
            max_question_bytes: 4,
            ..Default::default()
        };
        let tutor = Tutor::with_adapter(Box::new(CannedAdapter), settings);

        let result = tutor.solve(&request("Calculus I", "Too long")).await;
        assert!(result.is_err());
    }
}
