//! Bridge configuration loaded from environment variables.
//!
//! All settings come from environment variables (or a `.env` file via
//! `dotenvy`). Every key has a default matching the stock wiring: port
//! 9000, sub-protocol `rc-control-protocol`, sysfs GPIO on the lines behind
//! wiringPi pins 1–4 with the controller base detected at startup.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::domain::PinMap;
use crate::error::BridgeError;
use crate::gpio::GpioBackend;
use crate::gpio::sysfs::DEFAULT_SYSFS_ROOT;

/// Default listen address.
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:9000";

/// Default WebSocket sub-protocol name.
pub const DEFAULT_PROTOCOL: &str = "rc-control-protocol";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

impl LogFormat {
    /// Reads `LOG_FORMAT` (after loading `.env`) so logging can be set up
    /// before the rest of the configuration is validated.
    #[must_use]
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_value(std::env::var("LOG_FORMAT").ok().as_deref())
    }

    /// Maps a raw `LOG_FORMAT` value; anything but `json` means text.
    #[must_use]
    pub fn from_value(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.trim().eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Top-level bridge configuration.
///
/// Loaded once at startup via [`BridgeConfig::from_env`].
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// Socket address to bind the WebSocket server to.
    pub listen_addr: SocketAddr,

    /// Sub-protocol offered during the WebSocket handshake.
    pub protocol: String,

    /// GPIO implementation to open.
    pub gpio_backend: GpioBackend,

    /// Root of the sysfs GPIO tree.
    pub sysfs_root: PathBuf,

    /// Sysfs number of the header controller's first line; detected from
    /// `gpiochip*` when unset.
    pub sysfs_base: Option<u32>,

    /// Role → line assignment.
    pub pins: PinMap,

    /// Depth of the actuator command queue.
    pub actuator_queue_capacity: usize,
}

impl BridgeConfig {
    /// Loads configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// See [`BridgeConfig::from_lookup`].
    pub fn from_env() -> Result<Self, BridgeError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    ///
    /// Numeric values that are missing or unparsable fall back to their
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Config`] if `LISTEN_ADDR` cannot be parsed,
    /// `GPIO_BACKEND` names an unknown backend, or two pins share a line.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, BridgeError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_addr = lookup("LISTEN_ADDR").unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string());
        let listen_addr: SocketAddr = raw_addr
            .parse()
            .map_err(|e| BridgeError::Config(format!("LISTEN_ADDR {raw_addr:?}: {e}")))?;

        let protocol = lookup("WS_PROTOCOL")
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| DEFAULT_PROTOCOL.to_string());

        let gpio_backend = match lookup("GPIO_BACKEND") {
            Some(raw) => raw.parse()?,
            None => GpioBackend::default(),
        };

        let sysfs_root = lookup("GPIO_SYSFS_ROOT")
            .map_or_else(|| PathBuf::from(DEFAULT_SYSFS_ROOT), PathBuf::from);

        let sysfs_base = lookup("GPIO_SYSFS_BASE").and_then(|v| v.trim().parse().ok());

        let pins = PinMap::new(
            parse_with(&lookup, "PIN_FORWARD", PinMap::DEFAULT_FORWARD),
            parse_with(&lookup, "PIN_BACKWARD", PinMap::DEFAULT_BACKWARD),
            parse_with(&lookup, "PIN_LEFT", PinMap::DEFAULT_LEFT),
            parse_with(&lookup, "PIN_RIGHT", PinMap::DEFAULT_RIGHT),
        )?;

        let actuator_queue_capacity = parse_with(&lookup, "ACTUATOR_QUEUE_CAPACITY", 64);

        Ok(Self {
            listen_addr,
            protocol,
            gpio_backend,
            sysfs_root,
            sysfs_base,
            pins,
            actuator_queue_capacity,
        })
    }
}

/// Parses `key` as `T`, returning `default` on missing or invalid values.
fn parse_with<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    lookup(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
