use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kitchen_core::{
    create_display_system, load_config, validate_config, DisplayUpdate, RecipeHandler,
    RecipeStream, SseRecipeStream, UpdateCallback,
};
use kitchen_server::api::{create_router, WsBroadcaster};
use kitchen_server::metrics::record_display_update;
use kitchen_server::state::AppState;

/// How long to wait for the display loop to drain on shutdown
const DISPLAY_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine config path
    let config_path = std::env::var("KITCHEN_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    // Load configuration
    info!("Loading configuration from {:?}", config_path);
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    validate_config(&config).context("Configuration validation failed")?;

    info!("Configuration loaded successfully");

    // Display updates go to metrics and connected dashboards
    let ws_broadcaster = WsBroadcaster::default();
    let broadcaster_for_callback = ws_broadcaster.clone();
    let update_callback: UpdateCallback = Arc::new(move |update: &DisplayUpdate| {
        record_display_update(update);
        broadcaster_for_callback.display_updated(update);
    });

    // Create and spawn the display loop
    let (display, display_loop) = create_display_system(&config.display);
    let display_task = tokio::spawn(display_loop.with_update_callback(update_callback).run());

    // Subscribe to the recipe stream
    let stream = SseRecipeStream::new(&config.stream).context("Failed to create stream client")?;
    let subscription = stream
        .subscribe(Arc::new(RecipeHandler::new(display.clone())))
        .await;
    info!("Subscribed to recipe stream at {}", stream.url());

    let state = Arc::new(AppState::new(config.clone(), display, ws_broadcaster));
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(config.server.host, config.server.port);
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutting down...");

    // The handler holds a DisplayHandle; closing the subscription releases it
    subscription.close().await;
    info!("Recipe stream closed");

    // Open WebSocket tasks may still hold the state for a moment
    match tokio::time::timeout(DISPLAY_SHUTDOWN_TIMEOUT, display_task).await {
        Ok(_) => info!("Display loop stopped"),
        Err(_) => warn!("Display loop did not stop within {:?}", DISPLAY_SHUTDOWN_TIMEOUT),
    }

    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
