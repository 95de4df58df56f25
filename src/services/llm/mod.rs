//! Text-completion collaborators
//!
//! The orchestrator only needs "prompt in, free text out"; the provider wire
//! format stays behind this trait.
use crate::error::AppResult;

pub mod groq;

pub use groq::GroqClient;

/// Sampling temperature used for every recommendation prompt
pub const RECOMMENDATION_TEMPERATURE: f64 = 0.7;

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait LlmClient: Send + Sync {
    /// Sends `prompt` as a single user message and returns the model's text
    async fn complete(&self, prompt: &str) -> AppResult<String>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
