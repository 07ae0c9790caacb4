//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use tokio::sync::watch;

use crate::service::ActuatorHandle;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Sender side of the pin owner.
    pub actuator: ActuatorHandle,
    /// WebSocket sub-protocol offered during the handshake.
    pub protocol: Arc<str>,
    /// Flips to `true` when the server is shutting down.
    pub shutdown: watch::Receiver<bool>,
}

impl AppState {
    /// Creates the state plus the sender used to signal shutdown to open
    /// connections.
    #[must_use]
    pub fn new(actuator: ActuatorHandle, protocol: impl Into<Arc<str>>) -> (Self, watch::Sender<bool>) {
        let (shutdown_tx, shutdown) = watch::channel(false);
        let state = Self {
            actuator,
            protocol: protocol.into(),
            shutdown,
        };
        (state, shutdown_tx)
    }
}
