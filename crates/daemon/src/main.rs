use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use tokio::signal;
use tokio::sync::broadcast;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use playbrake_core::{
    load_config, validate_config, PlaybackMonitor, QBittorrentSession, SanitizedConfig,
    SpeedCoordinator, TautulliMonitor, ThrottleController, ThrottleSession,
};

/// Application version
const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting playbrake {}", VERSION);

    // Determine config path
    let config_path = std::env::var("PLAYBRAKE_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    // Load configuration
    info!("Loading configuration from {:?}", config_path);
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    // Validate configuration
    validate_config(&config).context("Configuration validation failed")?;

    info!(
        "Configuration loaded: {}",
        serde_json::to_string(&SanitizedConfig::from(&config)).unwrap_or_default()
    );

    // Create the playback monitor
    let monitor: Arc<dyn PlaybackMonitor> = Arc::new(TautulliMonitor::new(config.tautulli.clone()));
    info!(
        "Watching Tautulli at {}:{}",
        config.tautulli.host, config.tautulli.port
    );

    // Create the throttle controller
    let session: Arc<dyn ThrottleSession> =
        Arc::new(QBittorrentSession::new(config.qbittorrent.clone()));
    let throttle = ThrottleController::new(session)
        .with_confirm_delay(Duration::from_millis(config.qbittorrent.confirm_delay_ms))
        .with_toggle_backoff(Duration::from_millis(config.qbittorrent.toggle_backoff_ms));
    info!(
        "Controlling qBittorrent at {}:{}",
        config.qbittorrent.host, config.qbittorrent.port
    );

    // Initial authentication is the only fatal runtime failure; the loop
    // heals its own session afterwards.
    if !throttle.authenticate().await.unwrap_or(false) {
        bail!("Initial qBittorrent authentication failed");
    }

    // Start the coordination loop
    let coordinator = SpeedCoordinator::new(config.coordinator.clone(), monitor, throttle);
    let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
    let loop_handle = tokio::spawn(coordinator.run(shutdown_rx));
    info!("Coordination loop started");

    // Run until a shutdown signal arrives
    shutdown_signal().await;
    info!("Shutting down...");

    let _ = shutdown_tx.send(());
    let _ = loop_handle.await;
    info!("Coordination loop stopped");

    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
