use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;

use transcribe_gateway::application::services::{TranscriptionService, UploadService};
use transcribe_gateway::domain::UploadPolicy;
use transcribe_gateway::infrastructure::audio::SymphoniaAudioDecoder;
use transcribe_gateway::infrastructure::observability::{TracingConfig, init_tracing};
use transcribe_gateway::infrastructure::speech::RecognizerFactory;
use transcribe_gateway::infrastructure::storage::LocalStagingStore;
use transcribe_gateway::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("Failed to load settings")?;

    init_tracing(
        &TracingConfig::from_settings(environment, &settings.logging),
        settings.server.port,
    );

    let upload_policy = UploadPolicy::from_extensions(&settings.upload.allowed_extensions)
        .map_err(anyhow::Error::msg)?;

    let staging_store = Arc::new(
        LocalStagingStore::new(
            settings.upload.directory.clone(),
            settings.upload.max_upload_bytes,
        )
        .context("Failed to prepare upload directory")?,
    );

    let recognizer = RecognizerFactory::create(&settings.recognizer)
        .context("Failed to configure speech recognizer")?;

    tracing::info!(
        recognizer = recognizer.name(),
        upload_dir = %settings.upload.directory.display(),
        allowed = ?upload_policy.allowed(),
        "Transcription pipeline ready"
    );

    let transcription_service = Arc::new(TranscriptionService::new(
        Arc::new(SymphoniaAudioDecoder),
        recognizer,
        Duration::from_secs(settings.recognizer.timeout_seconds),
    ));
    let upload_service = Arc::new(UploadService::new(staging_store, transcription_service));

    let router = create_router(AppState::new(upload_service, upload_policy));

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        futures::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
