//! AI provider abstraction and implementations.
//!
//! A trait seam over the upstream generative service so the tutor logic can
//! be exercised against a mock.

pub mod gemini;
pub mod mock;

use async_trait::async_trait;
use thiserror::Error;

/// Error type for provider operations. Every variant means the upstream
/// service failed to deliver a usable reply; the distinction from a reply
/// that was delivered but violates the JSON contract is made downstream.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Network error: {0}")]
    NetworkError(String),
}

/// Trait for text generation providers (e.g. Gemini).
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Generate the raw text reply for a single prompt. One attempt, no
    /// retry.
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError>;

    /// Health check.
    async fn health_check(&self) -> Result<(), ProviderError>;
}
