use service_core::observability::init_tracing;
use tutor_service::config::TutorConfig;
use tutor_service::startup::Application;

#[tokio::main]
async fn main() -> Result<(), service_core::error::AppError> {
    // Load configuration - fail fast if invalid
    let config = TutorConfig::load()?;

    init_tracing("tutor-service", &config.common.log_level);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = ?config.common.environment,
        "Starting tutor service"
    );

    let app = Application::build(config).await?;
    app.run_until_stopped().await?;

    tracing::info!("Service shutdown complete");
    Ok(())
}
