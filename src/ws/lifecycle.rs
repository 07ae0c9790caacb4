//! Connection Handler: reacts to lifecycle events for one connection.

use crate::domain::{ConnectionEvent, ConnectionId};
use crate::service::ActuatorHandle;

/// Logs lifecycle events and forwards received payloads to the actuator.
///
/// Holds no per-connection state beyond the id used in log fields.
#[derive(Debug, Clone)]
pub struct ConnectionHandler {
    id: ConnectionId,
    actuator: ActuatorHandle,
}

impl ConnectionHandler {
    /// Creates a handler for a freshly accepted connection.
    #[must_use]
    pub const fn new(id: ConnectionId, actuator: ActuatorHandle) -> Self {
        Self { id, actuator }
    }

    /// Returns the connection id.
    #[must_use]
    pub const fn id(&self) -> ConnectionId {
        self.id
    }

    /// Handles one lifecycle event.
    ///
    /// Never fails: unrecognized payloads are dropped by the dispatcher and
    /// an unavailable actuator is only logged.
    pub async fn handle_event(&self, event: ConnectionEvent) {
        match event {
            ConnectionEvent::Opened => {
                tracing::info!(connection_id = %self.id, "client connected");
            }
            ConnectionEvent::MessageReceived(payload) => {
                tracing::info!(connection_id = %self.id, payload = ?payload, "message received");
                match self.actuator.dispatch(payload).await {
                    Ok(writes) if writes.is_empty() => {}
                    Ok(writes) => {
                        tracing::debug!(connection_id = %self.id, ?writes, "pins written");
                    }
                    Err(err) => {
                        tracing::error!(connection_id = %self.id, error = %err, "command dropped");
                    }
                }
            }
            ConnectionEvent::Closed => {
                tracing::info!(connection_id = %self.id, "client disconnected");
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex, PoisonError};

    use super::*;
    use crate::domain::{PinLevel, PinRole};
    use crate::error::BridgeError;
    use crate::gpio::{MemoryPins, OutputPins};
    use crate::service::Actuator;

    #[tokio::test]
    async fn open_and_close_touch_no_pins() {
        let pins = MemoryPins::new();
        let (actuator, _task) = Actuator::spawn(Box::new(pins.clone()), 4);
        let handler = ConnectionHandler::new(ConnectionId::new(), actuator);

        handler.handle_event(ConnectionEvent::Opened).await;
        handler.handle_event(ConnectionEvent::Closed).await;
        assert!(pins.history().is_empty());
    }

    #[tokio::test]
    async fn message_is_dispatched_before_returning() {
        let pins = MemoryPins::new();
        let (actuator, _task) = Actuator::spawn(Box::new(pins.clone()), 4);
        let handler = ConnectionHandler::new(ConnectionId::new(), actuator);

        handler
            .handle_event(ConnectionEvent::MessageReceived("BACKWARD".into()))
            .await;
        assert_eq!(pins.level(PinRole::Backward), PinLevel::High);
    }

    #[derive(Debug, Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn payload_control_characters_are_escaped_in_logs() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let (actuator, _task) = Actuator::spawn(Box::new(MemoryPins::new()), 4);
        let handler = ConnectionHandler::new(ConnectionId::new(), actuator);
        handler
            .handle_event(ConnectionEvent::MessageReceived(
                "HORN\n2026-01-01T00:00:00Z  INFO forged".into(),
            ))
            .await;

        let out = String::from_utf8_lossy(&logs.0.lock().unwrap_or_else(PoisonError::into_inner))
            .into_owned();
        let received: Vec<_> = out.lines().filter(|l| l.contains("message received")).collect();
        assert_eq!(received.len(), 1, "logs: {out}");
        assert!(received.iter().all(|l| l.contains(r"HORN\n2026")), "logs: {out}");
        assert!(!out.lines().any(|l| l.starts_with("2026-01-01T00:00:00Z")));
    }

    #[derive(Debug)]
    struct BrokenPins;

    impl OutputPins for BrokenPins {
        fn write(&mut self, _role: PinRole, _level: PinLevel) -> Result<(), BridgeError> {
            panic!("driver crashed");
        }

        fn name(&self) -> &'static str {
            "broken"
        }
    }

    #[tokio::test]
    async fn stopped_actuator_is_logged_not_fatal() {
        let (actuator, task) = Actuator::spawn(Box::new(BrokenPins), 4);
        let handler = ConnectionHandler::new(ConnectionId::new(), actuator.clone());

        handler
            .handle_event(ConnectionEvent::MessageReceived("STOP".into()))
            .await;
        assert!(task.await.is_err());
        assert!(matches!(
            actuator.dispatch("STOP").await,
            Err(BridgeError::ActuatorUnavailable)
        ));
        handler
            .handle_event(ConnectionEvent::MessageReceived("LEFT".into()))
            .await;
        handler.handle_event(ConnectionEvent::Closed).await;
    }
}
