//! In-memory output lines.
//!
//! [`MemoryPins`] is a cheap cloneable handle: every clone sees the same
//! levels, so a test can keep one clone while the actuator owns another.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::OutputPins;
use crate::domain::{PinLevel, PinRole, PinWrite};
use crate::error::BridgeError;

#[derive(Debug, Default)]
struct Lines {
    forward: PinLevel,
    backward: PinLevel,
    left: PinLevel,
    right: PinLevel,
    history: Vec<PinWrite>,
}

impl Lines {
    fn slot(&mut self, role: PinRole) -> &mut PinLevel {
        match role {
            PinRole::Forward => &mut self.forward,
            PinRole::Backward => &mut self.backward,
            PinRole::Left => &mut self.left,
            PinRole::Right => &mut self.right,
        }
    }

    const fn get(&self, role: PinRole) -> PinLevel {
        match role {
            PinRole::Forward => self.forward,
            PinRole::Backward => self.backward,
            PinRole::Left => self.left,
            PinRole::Right => self.right,
        }
    }
}

/// Output lines held in process memory. All lines start [`PinLevel::Low`].
#[derive(Debug, Clone, Default)]
pub struct MemoryPins {
    inner: Arc<Mutex<Lines>>,
}

impl MemoryPins {
    /// Creates four low lines with an empty write history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Lines> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the current level of `role`.
    #[must_use]
    pub fn level(&self, role: PinRole) -> PinLevel {
        self.lock().get(role)
    }

    /// Returns all four levels in [`PinRole::ALL`] order.
    #[must_use]
    pub fn levels(&self) -> [PinLevel; 4] {
        let lines = self.lock();
        PinRole::ALL.map(|role| lines.get(role))
    }

    /// Returns every write performed so far, oldest first.
    #[must_use]
    pub fn history(&self) -> Vec<PinWrite> {
        self.lock().history.clone()
    }
}

impl OutputPins for MemoryPins {
    fn write(&mut self, role: PinRole, level: PinLevel) -> Result<(), BridgeError> {
        let mut lines = self.lock();
        *lines.slot(role) = level;
        lines.history.push(PinWrite::new(role, level));
        tracing::debug!(%role, %level, "memory pin write");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
