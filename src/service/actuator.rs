//! Single owner of the output pins.
//!
//! The [`Actuator`] runs on a blocking thread and holds the only
//! `Box<dyn OutputPins>`. Connections talk to it through cloneable
//! [`ActuatorHandle`]s over a bounded channel, so writes from different
//! clients are applied one command at a time in arrival order. The thread
//! exits once every handle has been dropped.

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use super::dispatcher::dispatch;
use crate::domain::PinWrite;
use crate::error::BridgeError;
use crate::gpio::OutputPins;

struct Request {
    payload: String,
    reply: oneshot::Sender<Vec<PinWrite>>,
}

/// Background task that applies payloads to the pins.
#[derive(Debug)]
pub struct Actuator;

impl Actuator {
    /// Moves `pins` onto a dedicated blocking thread and returns a handle
    /// for submitting payloads plus the thread's join handle.
    ///
    /// `capacity` bounds the number of queued payloads; senders wait when
    /// it is full. A capacity of zero is raised to one.
    #[must_use]
    pub fn spawn(pins: Box<dyn OutputPins>, capacity: usize) -> (ActuatorHandle, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let backend = pins.name();
        let task = tokio::task::spawn_blocking(move || run(pins, rx));
        (ActuatorHandle { tx, backend }, task)
    }
}

fn run(mut pins: Box<dyn OutputPins>, mut rx: mpsc::Receiver<Request>) {
    tracing::info!(backend = pins.name(), "actuator started");
    while let Some(Request { payload, reply }) = rx.blocking_recv() {
        let writes = dispatch(&payload, &mut pins);
        // The caller may have gone away; the writes already happened.
        let _ = reply.send(writes);
    }
    tracing::info!("actuator stopped");
}

/// Cloneable sender side of the [`Actuator`].
#[derive(Debug, Clone)]
pub struct ActuatorHandle {
    tx: mpsc::Sender<Request>,
    backend: &'static str,
}

impl ActuatorHandle {
    /// Submits a raw payload and waits until it has been applied.
    ///
    /// Returns the pin writes performed, empty for unrecognized payloads.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::ActuatorUnavailable`] if the actuator thread
    /// has stopped.
    pub async fn dispatch(&self, payload: impl Into<String>) -> Result<Vec<PinWrite>, BridgeError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(Request {
                payload: payload.into(),
                reply,
            })
            .await
            .map_err(|_| BridgeError::ActuatorUnavailable)?;
        rx.await.map_err(|_| BridgeError::ActuatorUnavailable)
    }

    /// Name of the GPIO backend behind this actuator.
    #[must_use]
    pub const fn backend(&self) -> &'static str {
        self.backend
    }

    /// Returns `true` once the actuator thread has stopped.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}
