//! Tinta Server
//!
//! An HTTP gateway that forwards uploaded images to pretrained OCR backends
//! and text prompts to a remote image-generation provider.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tinta_server::config::Config;
use tinta_server::generation::GenerationClient;
use tinta_server::ocr::{DetectorEngine, VisionModelEngine};
use tinta_server::routes;
use tinta_server::state::AppState;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tinta_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();

    let config = Config::from_env().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config from env: {}, using defaults", e);
        Config::default()
    });

    tracing::info!("Starting Tinta Server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Vision model: {} at {}",
        config.vision.model,
        config.vision.base_url
    );
    tracing::info!("Detector languages: {}", config.detector.languages.join("+"));
    tracing::info!(
        "Image provider: {} at {}",
        config.generation.model,
        config.generation.base_url
    );

    // Construct the backends once; handlers share them read-only
    let vision_engine = Arc::new(VisionModelEngine::new(
        &config.vision.base_url,
        &config.vision.model,
    ));
    let detector_engine = Arc::new(DetectorEngine::new(&config.detector.languages));
    let generator = Arc::new(GenerationClient::new(&config.generation));

    let port = config.server.port;
    let app_state = AppState::new(config, vision_engine, detector_engine, generator);

    // Build CORS layer
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router
    let app = Router::new()
        .merge(routes::health::router())
        .merge(routes::ocr::router())
        .merge(routes::generate::router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state);

    // Start server with graceful shutdown
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Tinta Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();

    tracing::info!("Server shutdown complete");
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown...");
        },
    }
}
