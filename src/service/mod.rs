//! Service layer: command dispatch and the single owner of the pins.
//!
//! [`dispatch`] maps one payload to pin writes. [`Actuator`] owns the
//! [`crate::gpio::OutputPins`] backend and serializes every dispatch so
//! concurrent connections never race on the hardware.

pub mod actuator;
pub mod dispatcher;

pub use actuator::{Actuator, ActuatorHandle};
pub use dispatcher::dispatch;
