//! Tutor orchestration: prompt construction, model invocation and reply
//! validation.

use crate::dtos::{ExplainRequest, ExplanationResponse};
use crate::services::prompt;
use crate::services::providers::{ProviderError, TextProvider};
use crate::services::validator::parse_explanation;
use service_core::error::AppError;
use std::sync::Arc;

/// Coordinates a single explanation round-trip.
#[derive(Clone)]
pub struct TutorService {
    provider: Arc<dyn TextProvider>,
}

impl TutorService {
    pub fn new(provider: Arc<dyn TextProvider>) -> Self {
        Self { provider }
    }

    /// Ask the model to explain `concept` for a child of `age` years and
    /// validate the reply.
    ///
    /// A failure to reach the upstream service surfaces as a gateway
    /// timeout; a reply that violates the JSON contract surfaces as a bad
    /// gateway. Nothing partial is ever returned.
    pub async fn explain(&self, req: &ExplainRequest) -> Result<ExplanationResponse, AppError> {
        let prompt = prompt::explain_prompt(&req.concept, req.age);

        let raw = self.provider.generate(&prompt).await.map_err(|e| {
            tracing::error!(error = %e, concept = %req.concept, "Gemini request failed");
            AppError::GatewayTimeout(format!("Could not connect to AI service. {}", e))
        })?;

        let explanation = parse_explanation(&raw).map_err(|e| {
            tracing::error!(error = %e, concept = %req.concept, "Model reply failed validation");
            AppError::BadGateway(format!("Invalid response from AI service. {}", e))
        })?;

        Ok(explanation)
    }

    /// Verify the upstream provider is reachable.
    pub async fn health_check(&self) -> Result<(), ProviderError> {
        self.provider.health_check().await
    }
}
