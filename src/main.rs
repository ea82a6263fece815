use std::fs::OpenOptions;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use niche_poster::autopost::AutoPoster;
use niche_poster::config::{log_file_from_env, Config};
use niche_poster::schedule::ScheduleStore;
use niche_poster::services::Services;
use niche_poster::web::{self, AppState};

/// How long background tasks get to finish after a shutdown signal.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    // Initialize logging
    init_tracing()?;

    info!("Starting niche-poster");

    // Load and validate configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;

    info!(
        web = config.web_enabled,
        autopost = config.autopost_enabled,
        "Configuration loaded"
    );

    let services = Services::from_config(&config).context("Failed to build HTTP client")?;
    let config = Arc::new(config);
    let shutdown = CancellationToken::new();

    // Start autopost loop if enabled
    let autopost_handle = if config.autopost_enabled {
        let poster = AutoPoster::new(services.youtube.clone(), services.publisher.clone());
        let interval = config.autopost_interval;
        let token = shutdown.clone();
        Some(tokio::spawn(async move {
            poster.run_loop(interval, token).await;
        }))
    } else {
        info!("Autopost disabled");
        None
    };

    // Start web server if enabled
    let web_handle = if config.web_enabled {
        if let Some(parent) = config.schedule_path.parent() {
            tokio::fs::create_dir_all(parent).await.with_context(|| {
                format!("Failed to create schedule directory: {}", parent.display())
            })?;
        }
        let store = ScheduleStore::open(config.schedule_path.clone())
            .context("Failed to load scheduled posts")?;
        info!(
            path = %config.schedule_path.display(),
            pending = store.len(),
            "Schedule loaded"
        );

        let state = AppState::new(Arc::clone(&config), store, services);
        let token = shutdown.clone();
        Some(tokio::spawn(async move {
            if let Err(e) = web::serve(state, token).await {
                error!("Web server error: {e:#}");
            }
        }))
    } else {
        info!("Web server disabled");
        None
    };

    // Wait for shutdown signal
    shutdown_signal().await;

    info!("Shutting down...");
    shutdown.cancel();

    for handle in [web_handle, autopost_handle].into_iter().flatten() {
        let abort = handle.abort_handle();
        if tokio::time::timeout(SHUTDOWN_GRACE, handle).await.is_err() {
            warn!("Task did not stop in time, aborting");
            abort.abort();
        }
    }

    info!("Shutdown complete");

    Ok(())
}

fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,niche_poster=debug"));

    // Check if JSON logging is requested
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| matches!(v.to_lowercase().as_str(), "json" | "structured"))
        .unwrap_or(false);

    // Every event is also appended to the log file, without colour codes
    let log_path = log_file_from_env();
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file: {}", log_path.display()))?;

    if use_json {
        // Structured JSON logging for production
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(log_file)),
            )
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?;
    } else {
        // Pretty-printed logging for development
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(log_file)),
            )
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?;
    }

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
