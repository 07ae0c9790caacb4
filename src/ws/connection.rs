//! Read loop for a single WebSocket connection.
//!
//! Translates socket activity into [`ConnectionEvent`]s for the
//! [`ConnectionHandler`]. Each text frame is handled to completion before
//! the next frame is read.

use axum::extract::ws::{Message, WebSocket};
use futures_util::StreamExt;
use tokio::sync::watch;

use super::lifecycle::ConnectionHandler;
use crate::domain::ConnectionEvent;

/// Runs the read loop until the peer closes, the stream errors, or
/// `shutdown` flips to `true`.
pub async fn run_connection(
    mut socket: WebSocket,
    handler: ConnectionHandler,
    mut shutdown: watch::Receiver<bool>,
) {
    handler.handle_event(ConnectionEvent::Opened).await;

    let mut server_closing = false;
    loop {
        tokio::select! {
            msg = socket.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        let payload = text.as_str().to_owned();
                        handler
                            .handle_event(ConnectionEvent::MessageReceived(payload))
                            .await;
                    }
                    Some(Ok(Message::Binary(data))) => {
                        tracing::debug!(connection_id = %handler.id(), len = data.len(), "binary frame ignored");
                    }
                    Some(Ok(Message::Ping(_) | Message::Pong(_))) => {}
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Err(err)) => {
                        tracing::debug!(connection_id = %handler.id(), error = %err, "ws read failed");
                        break;
                    }
                }
            }
            // Also fires if the sender is gone, which only happens on shutdown.
            _ = async { let _ = shutdown.wait_for(|stop| *stop).await; } => {
                server_closing = true;
                break;
            }
        }
    }

    if server_closing {
        let _ = socket.send(Message::Close(None)).await;
    }

    handler.handle_event(ConnectionEvent::Closed).await;
}
