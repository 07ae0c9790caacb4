//! GPIO access layer.
//!
//! [`OutputPins`] is the write-only seam between the dispatcher and the
//! hardware. Two backends exist:
//!
//! - [`SysfsPins`]: Linux `/sys/class/gpio` lines.
//! - [`MemoryPins`]: in-process levels, for hosts without GPIO and for tests.

pub mod memory;
pub mod sysfs;

pub use memory::MemoryPins;
pub use sysfs::SysfsPins;

use std::fmt;
use std::str::FromStr;

use crate::domain::{PinLevel, PinRole};
use crate::error::BridgeError;

/// Digital output lines addressed by [`PinRole`].
///
/// Implementations perform the write immediately; there is no batching
/// and no read-back.
pub trait OutputPins: fmt::Debug + Send {
    /// Drives `role`'s line to `level`.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::GpioWrite`] if the underlying line rejects
    /// the write.
    fn write(&mut self, role: PinRole, level: PinLevel) -> Result<(), BridgeError>;

    /// Short backend name for logs and the health endpoint.
    fn name(&self) -> &'static str;
}

impl<P: OutputPins + ?Sized> OutputPins for Box<P> {
    fn write(&mut self, role: PinRole, level: PinLevel) -> Result<(), BridgeError> {
        (**self).write(role, level)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Which [`OutputPins`] implementation to open at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GpioBackend {
    /// Linux sysfs GPIO.
    #[default]
    Sysfs,
    /// In-memory lines.
    Memory,
}

impl GpioBackend {
    /// Returns the configuration spelling of this backend.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sysfs => "sysfs",
            Self::Memory => "memory",
        }
    }
}

impl FromStr for GpioBackend {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sysfs" => Ok(Self::Sysfs),
            "memory" | "mock" => Ok(Self::Memory),
            other => Err(BridgeError::Config(format!("unknown gpio backend: {other}"))),
        }
    }
}

impl fmt::Display for GpioBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
