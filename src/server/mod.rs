pub mod handlers;
pub mod models;

use axum::{
    body::Body,
    extract::DefaultBodyLimit,
    http::{header, Method, Request},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing::Span;

use crate::{config::ServerConfig, data::AppState};

/// Build the HTTP router: API routes, health checks and the static audio mount.
pub fn router(state: AppState, config: &ServerConfig) -> Router {
    let public_prefix = config.public_prefix.trim_end_matches('/');

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .route("/api/text-to-speech", post(handlers::text_to_speech))
        .route("/api/speech-to-text", post(handlers::speech_to_text))
        .nest_service(public_prefix, ServeDir::new(&config.static_dir))
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http().make_span_with(request_span::<Body>))
        .with_state(state)
}

fn is_health_path(path: &str) -> bool {
    matches!(path, "/" | "/health")
}

/// Health requests get their own span name so the exporter can drop them.
fn request_span<B>(request: &Request<B>) -> Span {
    if is_health_path(request.uri().path()) {
        tracing::info_span!("health_request", method = %request.method(), uri = %request.uri())
    } else {
        tracing::info_span!(
            "request",
            method = %request.method(),
            uri = %request.uri(),
            version = ?request.version(),
        )
    }
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
}
