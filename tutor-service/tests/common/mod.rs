use std::time::Duration;
use tutor_service::config::{GeminiSettings, GoogleConfig, SecurityConfig, TutorConfig};
use tutor_service::startup::Application;

pub struct TestApp {
    pub address: String,
}

impl TestApp {
    /// Spawn the application on a random port, pointed at the given Gemini
    /// base URL (usually a wiremock server).
    pub async fn spawn(gemini_base_url: &str) -> Self {
        Self::spawn_with_timeout(gemini_base_url, 5).await
    }

    /// Like [`TestApp::spawn`], with an explicit per-call timeout.
    pub async fn spawn_with_timeout(gemini_base_url: &str, request_timeout_secs: u64) -> Self {
        let config = TutorConfig {
            common: service_core::config::Config {
                port: 0, // Random port
                log_level: "info".to_string(),
                environment: service_core::config::Environment::Dev,
            },
            google: GoogleConfig {
                api_key: "test-api-key".to_string(),
            },
            gemini: GeminiSettings {
                model: "gemini-2.5-flash".to_string(),
                base_url: gemini_base_url.to_string(),
                request_timeout_secs,
            },
            security: SecurityConfig {
                allowed_origins: vec!["http://localhost:5173".to_string()],
            },
        };

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let address = format!("http://127.0.0.1:{}", app.port());

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to be ready by polling the health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }

        TestApp { address }
    }
}
