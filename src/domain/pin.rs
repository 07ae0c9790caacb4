//! Motor pins: logical roles, output levels, and the role → line mapping.

use std::fmt;

use crate::error::BridgeError;

/// Logical role of one of the four motor-driver output lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PinRole {
    /// Drives the motors forward.
    Forward,
    /// Drives the motors backward.
    Backward,
    /// Steers left.
    Left,
    /// Steers right.
    Right,
}

impl PinRole {
    /// All roles, in the order `STOP` clears them.
    pub const ALL: [Self; 4] = [Self::Forward, Self::Backward, Self::Left, Self::Right];

    /// Returns the lowercase role name used in logs and config keys.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Forward => "forward",
            Self::Backward => "backward",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl fmt::Display for PinRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Digital output level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PinLevel {
    /// Active drive signal.
    High,
    /// Inactive drive signal.
    #[default]
    Low,
}

impl PinLevel {
    /// Returns `true` for [`PinLevel::High`].
    #[must_use]
    pub const fn is_high(self) -> bool {
        matches!(self, Self::High)
    }
}

impl From<bool> for PinLevel {
    fn from(high: bool) -> Self {
        if high { Self::High } else { Self::Low }
    }
}

impl From<PinLevel> for bool {
    fn from(level: PinLevel) -> Self {
        level.is_high()
    }
}

impl fmt::Display for PinLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::High => f.write_str("HIGH"),
            Self::Low => f.write_str("LOW"),
        }
    }
}

/// A single pin write performed by the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PinWrite {
    /// Which pin was written.
    pub role: PinRole,
    /// Level written to it.
    pub level: PinLevel,
}

impl PinWrite {
    /// Creates a new `PinWrite`.
    #[must_use]
    pub const fn new(role: PinRole, level: PinLevel) -> Self {
        Self { role, level }
    }
}

/// Output line offsets on the header GPIO controller for each [`PinRole`].
///
/// Fixed at startup and immutable afterwards. Offsets are BCM numbers; the
/// defaults are the lines behind wiringPi pins 1–4 on a Raspberry Pi
/// header. Backends add their controller's base when addressing a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinMap {
    forward: u32,
    backward: u32,
    left: u32,
    right: u32,
}

impl PinMap {
    /// Default line for [`PinRole::Forward`] (wiringPi 1).
    pub const DEFAULT_FORWARD: u32 = 18;
    /// Default line for [`PinRole::Backward`] (wiringPi 2).
    pub const DEFAULT_BACKWARD: u32 = 27;
    /// Default line for [`PinRole::Left`] (wiringPi 3).
    pub const DEFAULT_LEFT: u32 = 22;
    /// Default line for [`PinRole::Right`] (wiringPi 4).
    pub const DEFAULT_RIGHT: u32 = 23;

    /// Builds a pin map from explicit line numbers.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Config`] if two roles share a line.
    pub fn new(forward: u32, backward: u32, left: u32, right: u32) -> Result<Self, BridgeError> {
        let map = Self {
            forward,
            backward,
            left,
            right,
        };
        for (i, a) in PinRole::ALL.iter().enumerate() {
            for b in PinRole::ALL.iter().skip(i + 1) {
                if map.line(*a) == map.line(*b) {
                    return Err(BridgeError::Config(format!(
                        "pins {a} and {b} both use line {}",
                        map.line(*a)
                    )));
                }
            }
        }
        Ok(map)
    }

    /// Returns the controller offset assigned to `role`.
    #[must_use]
    pub const fn line(&self, role: PinRole) -> u32 {
        match role {
            PinRole::Forward => self.forward,
            PinRole::Backward => self.backward,
            PinRole::Left => self.left,
            PinRole::Right => self.right,
        }
    }

    /// Iterates `(role, line)` pairs in [`PinRole::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (PinRole, u32)> + '_ {
        PinRole::ALL.into_iter().map(|role| (role, self.line(role)))
    }
}

impl Default for PinMap {
    fn default() -> Self {
        Self {
            forward: Self::DEFAULT_FORWARD,
            backward: Self::DEFAULT_BACKWARD,
            left: Self::DEFAULT_LEFT,
            right: Self::DEFAULT_RIGHT,
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn default_map_uses_wiringpi_lines() {
        let map = PinMap::default();
        assert_eq!(map.line(PinRole::Forward), 18);
        assert_eq!(map.line(PinRole::Backward), 27);
        assert_eq!(map.line(PinRole::Left), 22);
        assert_eq!(map.line(PinRole::Right), 23);
    }

    #[test]
    fn new_rejects_shared_lines() {
        let result = PinMap::new(5, 6, 5, 7);
        let Err(BridgeError::Config(msg)) = result else {
            panic!("expected config error");
        };
        assert!(msg.contains("forward"));
        assert!(msg.contains("left"));
    }

    #[test]
    fn iter_follows_role_order() {
        let Ok(map) = PinMap::new(1, 2, 3, 4) else {
            panic!("distinct lines");
        };
        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(
            pairs,
            vec![
                (PinRole::Forward, 1),
                (PinRole::Backward, 2),
                (PinRole::Left, 3),
                (PinRole::Right, 4),
            ]
        );
    }

    #[test]
    fn level_bool_conversions() {
        assert_eq!(PinLevel::from(true), PinLevel::High);
        assert_eq!(PinLevel::from(false), PinLevel::Low);
        assert!(bool::from(PinLevel::High));
        assert_eq!(PinLevel::default(), PinLevel::Low);
    }
}
