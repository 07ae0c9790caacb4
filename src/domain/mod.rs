//! Domain layer: pins, drive commands, and connection lifecycle events.
//!
//! Everything here is plain data. Side effects live in [`crate::gpio`]
//! and [`crate::service`].

pub mod command;
pub mod connection;
pub mod pin;

pub use command::Command;
pub use connection::{ConnectionEvent, ConnectionId};
pub use pin::{PinLevel, PinMap, PinRole, PinWrite};
