//! The closed set of drive commands and the pin writes each one implies.

use std::fmt;

use super::pin::{PinLevel, PinRole, PinWrite};

/// A recognized drive command.
///
/// Any payload that is not byte-for-byte one of the five literals is not a
/// command; [`Command::parse`] returns `None` for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// `FORWARD`: raise the forward pin.
    Forward,
    /// `BACKWARD`: raise the backward pin.
    Backward,
    /// `LEFT`: raise the left pin.
    Left,
    /// `RIGHT`: raise the right pin.
    Right,
    /// `STOP`: drop all four pins.
    Stop,
}

impl Command {
    /// Every command, in the order payloads are matched.
    pub const ALL: [Self; 5] = [
        Self::Forward,
        Self::Backward,
        Self::Left,
        Self::Right,
        Self::Stop,
    ];

    /// Matches a raw payload against the command literals.
    ///
    /// Comparison is exact: case-sensitive, no trimming.
    #[must_use]
    pub fn parse(payload: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|cmd| cmd.as_str() == payload)
    }

    /// Returns the wire literal for this command.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Forward => "FORWARD",
            Self::Backward => "BACKWARD",
            Self::Left => "LEFT",
            Self::Right => "RIGHT",
            Self::Stop => "STOP",
        }
    }

    /// Returns the pin writes this command performs, in order.
    ///
    /// Direction commands raise only their own pin and leave the others
    /// untouched, so two directions without an intervening `STOP` keep both
    /// pins high.
    #[must_use]
    pub fn writes(self) -> Vec<PinWrite> {
        let raise = |role| vec![PinWrite::new(role, PinLevel::High)];
        match self {
            Self::Forward => raise(PinRole::Forward),
            Self::Backward => raise(PinRole::Backward),
            Self::Left => raise(PinRole::Left),
            Self::Right => raise(PinRole::Right),
            Self::Stop => PinRole::ALL
                .into_iter()
                .map(|role| PinWrite::new(role, PinLevel::Low))
                .collect(),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_each_literal() {
        for cmd in Command::ALL {
            assert_eq!(Command::parse(cmd.as_str()), Some(cmd));
        }
    }

    #[test]
    fn parse_is_case_sensitive_and_untrimmed() {
        for payload in ["forward", "Forward", " FORWARD", "STOP\n", "STOP\0", "", "HORN"] {
            assert_eq!(Command::parse(payload), None, "payload {payload:?}");
        }
    }

    #[test]
    fn direction_raises_only_its_own_pin() {
        assert_eq!(
            Command::Left.writes(),
            vec![PinWrite::new(PinRole::Left, PinLevel::High)]
        );
        assert_eq!(
            Command::Backward.writes(),
            vec![PinWrite::new(PinRole::Backward, PinLevel::High)]
        );
    }

    #[test]
    fn stop_lowers_all_four() {
        let writes = Command::Stop.writes();
        assert_eq!(writes.len(), 4);
        assert!(writes.iter().all(|w| w.level == PinLevel::Low));
        let roles: Vec<_> = writes.iter().map(|w| w.role).collect();
        assert_eq!(roles, PinRole::ALL.to_vec());
    }
}
