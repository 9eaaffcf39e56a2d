//! friday-server - REST API server binary.

use std::net::SocketAddr;

use friday_core::{FridayConfig, ReminderScheduler};
use friday_server::{create_server, create_state};
use tokio::signal;
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
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
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::from_default_env()
                .add_directive(Level::INFO.into())
                .add_directive("friday_server=debug".parse()?),
        )
        .init();

    // Configuration file takes precedence over the environment
    let config = match std::env::var("FRIDAY_CONFIG") {
        Ok(path) => {
            info!(path = %path, "Loading configuration file");
            FridayConfig::from_file(&path)?
        }
        Err(_) => FridayConfig::from_env(),
    };

    let host = std::env::var("FRIDAY_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = std::env::var("FRIDAY_PORT")
        .unwrap_or_else(|_| "3000".to_string())
        .parse()
        .map_err(|e| format!("FRIDAY_PORT must be a valid port number: {}", e))?;

    let state = create_state(&config)?;

    let mut reminders = if config.reminders.enabled {
        let scheduler = ReminderScheduler::new(state.assistant.clone(), &config.reminders).await?;
        scheduler.start().await?;
        Some(scheduler)
    } else {
        info!("Due-task reminders disabled");
        None
    };

    let app = create_server(state);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Starting friday-server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Serve with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            info!("Shutdown signal received, stopping reminders...");
        })
        .await?;

    if let Some(scheduler) = reminders.as_mut() {
        scheduler.shutdown().await?;
    }

    info!("Server stopped cleanly");
    Ok(())
}
