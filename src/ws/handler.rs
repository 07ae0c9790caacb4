//! Axum WebSocket upgrade handler.

use axum::extract::State;
use axum::extract::ws::WebSocketUpgrade;
use axum::response::IntoResponse;

use super::connection::run_connection;
use super::lifecycle::ConnectionHandler;
use crate::app_state::AppState;
use crate::domain::ConnectionId;

/// `GET /` and `GET /ws` — Upgrade HTTP connection to WebSocket.
///
/// Offers the configured sub-protocol; clients that do not ask for it are
/// accepted anyway.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    let handler = ConnectionHandler::new(ConnectionId::new(), state.actuator.clone());
    let shutdown = state.shutdown.clone();

    ws.protocols([state.protocol.to_string()])
        .on_upgrade(move |socket| run_connection(socket, handler, shutdown))
}
