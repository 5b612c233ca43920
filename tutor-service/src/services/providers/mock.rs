//! Mock provider implementation for testing.

use super::{ProviderError, TextProvider};
use async_trait::async_trait;

/// Mock text provider: returns a canned reply, or fails as if the upstream
/// were unreachable.
pub struct MockTextProvider {
    reply: Option<String>,
}

impl MockTextProvider {
    pub fn with_reply(reply: impl Into<String>) -> Self {
        Self {
            reply: Some(reply.into()),
        }
    }

    pub fn unavailable() -> Self {
        Self { reply: None }
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    async fn generate(&self, _prompt: &str) -> Result<String, ProviderError> {
        match &self.reply {
            Some(reply) => Ok(reply.clone()),
            None => Err(ProviderError::NetworkError(
                "Mock provider unavailable".to_string(),
            )),
        }
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        match self.reply {
            Some(_) => Ok(()),
            None => Err(ProviderError::NetworkError(
                "Mock provider unavailable".to_string(),
            )),
        }
    }
}
