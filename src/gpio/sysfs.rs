//! Linux sysfs GPIO backend (`/sys/class/gpio`).
//!
//! [`PinMap`] holds offsets on the header controller; the sysfs number of a
//! line is that controller's `base` plus the offset. On recent Raspberry Pi
//! kernels the header chip starts at 512, so BCM 18 is sysfs line 530.
//!
//! Opening exports every line that is not exported yet and sets it as an
//! output driven low. Writes go straight to `gpioN/value`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use super::OutputPins;
use crate::domain::{PinLevel, PinMap, PinRole};
use crate::error::BridgeError;

/// Default sysfs GPIO root.
pub const DEFAULT_SYSFS_ROOT: &str = "/sys/class/gpio";

/// Label prefix of the SoC pin controller that owns the header lines
/// (`pinctrl-bcm2835`, `pinctrl-bcm2711`, `pinctrl-rp1`).
pub const HEADER_CHIP_LABEL_PREFIX: &str = "pinctrl-";

/// Attempts at configuring a freshly exported line before giving up.
const EXPORT_SETTLE_ATTEMPTS: u32 = 50;

/// Pause between attempts while udev creates and chmods the line files.
const EXPORT_SETTLE_DELAY: Duration = Duration::from_millis(10);

/// Output lines driven through the sysfs GPIO interface.
#[derive(Debug)]
pub struct SysfsPins {
    root: PathBuf,
    map: PinMap,
    base: u32,
}

impl SysfsPins {
    /// Exports and configures all four lines of `map` under `root`.
    ///
    /// `base` is the sysfs number of the header controller's first line.
    /// When `None` it is read from the `gpiochip*` entry whose label starts
    /// with [`HEADER_CHIP_LABEL_PREFIX`], or 0 if there is none.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::GpioInit`] for the first line that cannot be
    /// exported or switched to output.
    pub fn open(
        root: impl Into<PathBuf>,
        map: PinMap,
        base: Option<u32>,
    ) -> Result<Self, BridgeError> {
        let root = root.into();
        let base = base.unwrap_or_else(|| detect_base(&root));
        tracing::debug!(base, root = %root.display(), "gpio controller base");

        let pins = Self { root, map, base };
        for (role, offset) in map.iter() {
            let line = pins.line(role).ok_or_else(|| BridgeError::GpioInit {
                line: offset,
                source: io::Error::new(io::ErrorKind::InvalidInput, "line number overflows u32"),
            })?;
            export_output(&pins.root, line).map_err(|source| BridgeError::GpioInit { line, source })?;
            tracing::debug!(%role, offset, line, "gpio line ready");
        }
        Ok(pins)
    }

    /// Returns the pin map this backend was opened with.
    #[must_use]
    pub const fn pin_map(&self) -> &PinMap {
        &self.map
    }

    /// Returns the controller base added to every offset.
    #[must_use]
    pub const fn base(&self) -> u32 {
        self.base
    }

    /// Returns the sysfs line number for `role`.
    #[must_use]
    pub const fn line(&self, role: PinRole) -> Option<u32> {
        self.base.checked_add(self.map.line(role))
    }
}

fn line_dir(root: &Path, line: u32) -> PathBuf {
    root.join(format!("gpio{line}"))
}

/// Reads the base of the header controller from `gpiochip*/{label,base}`.
fn detect_base(root: &Path) -> u32 {
    let Ok(entries) = fs::read_dir(root) else {
        return 0;
    };
    entries
        .flatten()
        .filter(|entry| entry.file_name().to_string_lossy().starts_with("gpiochip"))
        .filter_map(|entry| {
            let dir = entry.path();
            let label = fs::read_to_string(dir.join("label")).ok()?;
            if !label.trim().starts_with(HEADER_CHIP_LABEL_PREFIX) {
                return None;
            }
            fs::read_to_string(dir.join("base")).ok()?.trim().parse().ok()
        })
        .min()
        .unwrap_or(0)
}

fn export_output(root: &Path, line: u32) -> io::Result<()> {
    let direction = line_dir(root, line).join("direction");
    if line_dir(root, line).exists() {
        // "low" sets the direction to output and drives it low in one step.
        return fs::write(direction, "low");
    }

    fs::write(root.join("export"), line.to_string())?;
    let mut attempt = 1;
    loop {
        match fs::write(&direction, "low") {
            Err(err)
                if attempt < EXPORT_SETTLE_ATTEMPTS
                    && matches!(
                        err.kind(),
                        io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied
                    ) =>
            {
                attempt += 1;
                thread::sleep(EXPORT_SETTLE_DELAY);
            }
            result => return result,
        }
    }
}

impl OutputPins for SysfsPins {
    fn write(&mut self, role: PinRole, level: PinLevel) -> Result<(), BridgeError> {
        let offset = self.map.line(role);
        let Some(line) = self.line(role) else {
            return Err(BridgeError::GpioWrite {
                role,
                line: offset,
                source: io::Error::new(io::ErrorKind::InvalidInput, "line number overflows u32"),
            });
        };
        let value = if level.is_high() { "1" } else { "0" };
        fs::write(line_dir(&self.root, line).join("value"), value)
            .map_err(|source| BridgeError::GpioWrite { role, line, source })
    }

    fn name(&self) -> &'static str {
        "sysfs"
    }
}
