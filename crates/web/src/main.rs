use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use feedback_client::{ReviewApi, ReviewBackend};
use feedback_ui::poller::PollerHandle;
use feedback_web::config::WebConfig;
use feedback_web::router::build_app_router;
use feedback_web::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "feedback_web=debug,feedback_ui=debug,feedback_client=debug,tower_http=debug"
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = WebConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = config.port,
        api_url = %config.client.base_url,
        refresh_secs = config.refresh_interval.as_secs(),
        "Loaded server configuration",
    );

    // --- Review backend ---
    let api = ReviewApi::new(&config.client).expect("Failed to build review API client");
    let backend: Arc<dyn ReviewBackend> = Arc::new(api);

    if backend.check_health().await {
        tracing::info!("Review backend health check passed");
    } else {
        tracing::warn!(api_url = %config.client.base_url, "Review backend is not reachable yet");
    }

    // --- App state ---
    let state = AppState::new(config.clone(), backend);

    // --- Dashboard poller ---
    let poller = PollerHandle::spawn(Arc::clone(&state.dashboard), config.refresh_interval);

    // --- Start server ---
    let app = build_app_router(state);

    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    poller.shutdown().await;
    tracing::info!("Dashboard poller stopped");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for SIGINT (Ctrl-C) or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
