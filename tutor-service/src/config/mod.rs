use serde::Deserialize;
use service_core::config::{self as core_config, get_env};
use service_core::error::AppError;

use crate::services::providers::gemini::GEMINI_API_BASE;

/// Default upper bound on a single Gemini call. The upstream enforces no
/// deadline of its own, so an explicit one here keeps a degraded upstream
/// from suspending callers indefinitely.
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Origins allowed by default: the Vite dev hosts and the deployed frontend.
const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:5173,http://localhost:5174,http://127.0.0.1:5173,https://matemago-app.onrender.com";

#[derive(Debug, Clone, Deserialize)]
pub struct TutorConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub google: GoogleConfig,
    pub gemini: GeminiSettings,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoogleConfig {
    pub api_key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeminiSettings {
    /// Model used for explanation generation (e.g., gemini-2.5-flash)
    pub model: String,
    /// API base URL; overridden in tests to point at a local mock
    pub base_url: String,
    /// Upper bound on a single generation call
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SecurityConfig {
    pub allowed_origins: Vec<String>,
}

impl TutorConfig {
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;
        let is_prod = common.environment.is_prod();

        Ok(TutorConfig {
            common,
            google: GoogleConfig {
                api_key: get_env("GOOGLE_API_KEY", None, is_prod)?,
            },
            gemini: GeminiSettings {
                model: get_env("GENAI_TEXT_MODEL", Some("gemini-2.5-flash"), is_prod)?,
                base_url: get_env("GENAI_API_BASE_URL", Some(GEMINI_API_BASE), is_prod)?,
                request_timeout_secs: get_env(
                    "GENAI_REQUEST_TIMEOUT_SECS",
                    Some(&DEFAULT_REQUEST_TIMEOUT_SECS.to_string()),
                    is_prod,
                )?
                .parse()
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
            },
            security: SecurityConfig {
                allowed_origins: get_env("ALLOWED_ORIGINS", Some(DEFAULT_ALLOWED_ORIGINS), is_prod)?
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
            },
        })
    }
}
