//! # rc-bridge
//!
//! WebSocket remote-control bridge for a small robot or vehicle.
//!
//! Clients send bare text commands (`FORWARD`, `BACKWARD`, `LEFT`,
//! `RIGHT`, `STOP`) over a WebSocket; each one is mapped to writes on four
//! digital output pins that drive a motor controller. Nothing is sent back.
//!
//! ## Architecture
//!
//! ```text
//! Clients (WebSocket text frames)
//!     │
//!     ├── WS Handler + ConnectionHandler (ws/)
//!     │
//!     ├── ActuatorHandle ──mpsc──▶ Actuator thread (service/)
//!     │                               └── dispatch(payload)
//!     │
//!     └── OutputPins: sysfs | memory (gpio/)
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod gpio;
pub mod service;
pub mod ws;

use crate::config::BridgeConfig;
use crate::error::BridgeError;
use crate::gpio::{GpioBackend, MemoryPins, OutputPins, SysfsPins};

/// Opens the GPIO backend selected by `config`.
///
/// # Errors
///
/// Returns [`BridgeError::GpioInit`] if the sysfs lines cannot be prepared.
pub fn open_pins(config: &BridgeConfig) -> Result<Box<dyn OutputPins>, BridgeError> {
    match config.gpio_backend {
        GpioBackend::Sysfs => Ok(Box::new(SysfsPins::open(
            &config.sysfs_root,
            config.pins,
            config.sysfs_base,
        )?)),
        GpioBackend::Memory => Ok(Box::new(MemoryPins::new())),
    }
}
