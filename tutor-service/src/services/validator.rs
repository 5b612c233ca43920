//! Validation and normalization of raw model output.
//!
//! The model is instructed to reply with a single minified JSON object, but
//! in practice replies arrive wrapped in markdown fences or padded with
//! whitespace. This module turns that untrusted text into a well-typed
//! [`ExplanationResponse`] or a classified failure.

use crate::dtos::ExplanationResponse;
use thiserror::Error;

/// How many characters of an offending payload to keep for diagnostics.
const DIAGNOSTIC_PREFIX_LEN: usize = 100;

/// Keys a model reply must carry, checked in this order.
const REQUIRED_FIELDS: [&str; 3] = ["explanation", "visual_type", "visual_code"];

/// Why a model reply was rejected.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("response does not look like a JSON object: {prefix}")]
    MalformedShape { prefix: String },

    #[error("error decoding model response: {message}")]
    Decode { message: String },

    #[error("missing required key '{field}' in model response")]
    MissingField { field: &'static str },
}

/// Parse the raw text returned by the model into a well-typed response.
///
/// Pure function: trims, strips a surrounding markdown fence if present,
/// rejects anything that is not brace-wrapped before attempting a parse,
/// then requires all three keys. The same input always yields the same
/// result.
pub fn parse_explanation(raw: &str) -> Result<ExplanationResponse, ValidationError> {
    let text = strip_markdown_fence(raw.trim()).trim();

    // Cheap structural check before handing obviously-broken output to the
    // JSON parser; also gives a clearer diagnostic.
    if !(text.starts_with('{') && text.ends_with('}')) {
        return Err(ValidationError::MalformedShape {
            prefix: diagnostic_prefix(text),
        });
    }

    let object: serde_json::Map<String, serde_json::Value> = serde_json::from_str(text)
        .map_err(|e| ValidationError::Decode {
            message: e.to_string(),
        })?;

    for field in REQUIRED_FIELDS {
        if !object.contains_key(field) {
            return Err(ValidationError::MissingField { field });
        }
    }

    serde_json::from_value(serde_json::Value::Object(object)).map_err(|e| {
        ValidationError::Decode {
            message: e.to_string(),
        }
    })
}

/// Strip a leading ```` ```json ```` or ```` ``` ```` opener and a trailing
/// ```` ``` ```` closer.
fn strip_markdown_fence(text: &str) -> &str {
    let mut text = text;
    if let Some(rest) = text.strip_prefix("```json") {
        text = rest;
    } else if let Some(rest) = text.strip_prefix("```") {
        text = rest;
    }
    if let Some(rest) = text.strip_suffix("```") {
        text = rest;
    }
    text
}

fn diagnostic_prefix(text: &str) -> String {
    text.chars().take(DIAGNOSTIC_PREFIX_LEN).collect()
}
