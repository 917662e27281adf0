//! Share Roll - API Server Binary
//!
//! This binary starts the HTTP API server for the share roll calculator.
//!
//! # Usage
//!
//! ```bash
//! # Run with default configuration
//! cargo run --bin share-roll-api
//!
//! # Run with environment variables
//! API_HOST=0.0.0.0 API_PORT=8080 API_DEFAULT_OPERATION_ORDER=redemption_first cargo run --bin share-roll-api
//! ```
//!
//! # Environment Variables
//!
//! * `API_HOST` - Server host (default: 0.0.0.0)
//! * `API_PORT` - Server port (default: 8080)
//! * `API_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//! * `API_LOG_JSON` - Emit JSON log lines (default: false)
//! * `API_DEFAULT_OPERATION_ORDER` - `contribution_first` or `redemption_first`
//!   (default: contribution_first)
//! * `API_CAPTURE_NAV_SNAPSHOTS` - Include month-end NAV snapshots (default: true)

use interface_api::{config::ApiConfig, create_router};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Main entry point for the API server.
///
/// Loads configuration, initializes logging and starts the HTTP server.
///
/// # Errors
///
/// Returns an error if:
/// - The configured address cannot be parsed
/// - Server fails to bind to the configured address
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let (config, config_error) = load_config();

    init_tracing(&config.log_level, config.log_json);

    if let Some(err) = config_error {
        tracing::warn!(error = %err, "Invalid API configuration, using defaults");
    }

    tracing::info!(
        host = %config.host,
        port = %config.port,
        operation_order = %config.default_operation_order,
        "Starting share roll API server"
    );

    let addr: SocketAddr = config.server_addr().parse()?;
    let app = create_router(config);

    tracing::info!(%addr, "Server listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Loads API configuration from environment variables.
///
/// Unset fields take their defaults. If the environment holds a value that
/// cannot be parsed, the whole configuration falls back to defaults and the
/// error is returned alongside so it can be logged once tracing is up.
fn load_config() -> (ApiConfig, Option<config::ConfigError>) {
    match ApiConfig::from_env() {
        Ok(config) => (config, None),
        Err(err) => {
            let fallback = ApiConfig {
                log_level: std::env::var("API_LOG_LEVEL")
                    .or_else(|_| std::env::var("RUST_LOG"))
                    .unwrap_or_else(|_| "info".to_string()),
                ..ApiConfig::default()
            };
            (fallback, Some(err))
        }
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// # Arguments
///
/// * `log_level` - The minimum log level to output (trace, debug, info, warn, error)
/// * `json` - Emit JSON lines instead of human-readable text
fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json).then(|| tracing_subscriber::fmt::layer().with_target(true)))
        .init();
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// In-flight requests complete before the process exits.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
