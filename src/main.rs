//! rc-bridge server entry point.
//!
//! Opens the GPIO lines, then serves the WebSocket endpoint until Ctrl-C or
//! SIGTERM.

use tracing_subscriber::EnvFilter;

use rc_bridge::api;
use rc_bridge::app_state::AppState;
use rc_bridge::config::{BridgeConfig, LogFormat};
use rc_bridge::error::BridgeError;
use rc_bridge::gpio::OutputPins;
use rc_bridge::service::Actuator;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match LogFormat::from_env() {
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
        LogFormat::Json => tracing_subscriber::fmt().json().with_env_filter(filter).init(),
    }

    // Load configuration
    let config = BridgeConfig::from_env().inspect_err(|err| {
        tracing::error!(error = %err, "invalid configuration");
    })?;

    // Open GPIO
    let pins = rc_bridge::open_pins(&config).inspect_err(|err| {
        tracing::error!(error = %err, "gpio initialization failed");
    })?;
    tracing::info!(backend = pins.name(), pins = ?config.pins, "gpio ready");

    let (actuator, actuator_task) = Actuator::spawn(pins, config.actuator_queue_capacity);

    // Build router
    let (app_state, shutdown_tx) = AppState::new(actuator, config.protocol.as_str());
    let app = api::build_router(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .map_err(BridgeError::Bind)
        .inspect_err(|err| tracing::error!(error = %err, addr = %config.listen_addr, "listener creation failed"))?;
    tracing::info!(addr = %config.listen_addr, protocol = %config.protocol, "websocket server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            tracing::info!("shutdown requested");
            let _ = shutdown_tx.send(true);
        })
        .await
        .map_err(BridgeError::Server)?;

    // Open connections saw the shutdown flag; once they finish, the last
    // actuator handle drops and the thread exits.
    if let Err(err) = actuator_task.await {
        tracing::warn!(error = %err, "actuator thread ended abnormally");
    }
    tracing::info!("stopped");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %err, "ctrl-c handler unavailable");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(err) => {
                tracing::warn!(error = %err, "SIGTERM handler unavailable");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
