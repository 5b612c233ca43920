use serde::{Deserialize, Serialize};
use validator::Validate;

/// Inbound explanation request: a math concept and the child's age.
#[derive(Debug, Deserialize, Validate)]
pub struct ExplainRequest {
    #[validate(length(min = 1, message = "Concept must not be empty"))]
    pub concept: String,

    #[validate(range(min = 1, max = 18, message = "Age must be between 1 and 18"))]
    pub age: i32,
}

/// Explanation produced by the model.
///
/// `visual_type` is passed through as received; the frontend renders
/// `svg`, `mermaid` and `chartjs`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplanationResponse {
    pub explanation: String,
    pub visual_type: String,
    pub visual_code: String,
}
