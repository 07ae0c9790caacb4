//! Bridge error types.
//!
//! [`BridgeError`] is the central error type. Startup variants
//! (`Config`, `GpioInit`, `Bind`) end the process; the rest are logged at
//! runtime and never reach the client.

use std::io;

use crate::domain::PinRole;

/// Server-side error enum.
///
/// | Variant               | When                                   | Effect          |
/// |-----------------------|----------------------------------------|-----------------|
/// | `Config`              | invalid environment configuration      | fatal at startup|
/// | `GpioInit`            | a line cannot be exported / configured | fatal at startup|
/// | `Bind`                | listener cannot bind                   | fatal at startup|
/// | `GpioWrite`           | a value write fails                    | logged, dropped |
/// | `ActuatorUnavailable` | the pin owner task has stopped         | logged, dropped |
/// | `Server`              | the HTTP server loop fails             | fatal           |
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    /// Configuration value is missing or malformed.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A GPIO line could not be prepared for output.
    #[error("gpio line {line} initialization failed: {source}")]
    GpioInit {
        /// Physical line number.
        line: u32,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// Writing a level to a GPIO line failed.
    #[error("gpio write to {role} (line {line}) failed: {source}")]
    GpioWrite {
        /// Logical pin being written.
        role: PinRole,
        /// Physical line number.
        line: u32,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// The WebSocket listener could not be bound.
    #[error("failed to bind listener: {0}")]
    Bind(#[source] io::Error),

    /// The actuator task is no longer accepting commands.
    #[error("actuator task is not running")]
    ActuatorUnavailable,

    /// The HTTP server terminated with an error.
    #[error("server error: {0}")]
    Server(#[source] io::Error),
}
