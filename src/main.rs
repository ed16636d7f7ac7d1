use std::{sync::Arc, time::Duration};

use anyhow::Context as _;
use speech_relay::{
    retention_monitor::RetentionMonitor,
    server,
    speech::{auth::GcpTokenSource, gcp_stt::gcp_stt::GCPSTT, gcp_tts::gcp_tts::GCPTTS},
    storage::LocalAudioStore,
    trace::init_tracing_subscriber,
    AppState, Config,
};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load config
    let config = Config::load().context("Cannot load config")?;

    let _guard = init_tracing_subscriber(&config.otel_http_url, config.log_level()?)?;

    // Create GCP clients sharing one token
    let token_source = Arc::new(
        GcpTokenSource::new(config.google.credentials_path.clone())
            .await
            .context("GCP init error")?,
    );
    info!("Successfully initialized Google Cloud clients");

    let tts = GCPTTS::new(
        token_source.clone(),
        config.google.tts_endpoint.clone(),
        config.synthesis.clone(),
        config.request_timeout(),
    )?;

    let stt = GCPSTT::new(
        token_source,
        config.google.stt_endpoint.clone(),
        config.recognition.clone(),
        config.request_timeout(),
    )?;

    // Create static audio storage
    let audio_store = LocalAudioStore::new(
        config.server.static_dir.clone(),
        &config.server.public_prefix,
    );
    audio_store
        .init()
        .await
        .context("Cannot create static directory")?;

    let retention = RetentionMonitor::start(
        audio_store.root().to_path_buf(),
        Duration::from_secs(config.retention.max_age_secs),
        Duration::from_secs(config.retention.sweep_interval_secs),
    );

    let state = AppState::new(Arc::new(tts), Arc::new(stt), Arc::new(audio_store));
    let app = server::router(state, &config.server);

    let addr = config.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Cannot bind {}", addr))?;

    info!("Starting server on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(retention) = retention {
        retention.abort();
    }

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "Cannot listen for Ctrl-C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "Cannot listen for SIGTERM");
                futures::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = futures::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
