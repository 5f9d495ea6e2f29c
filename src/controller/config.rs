//! Configuration for the spoofing cycle controller

use crate::exchange::{ExchangeMode, PaperSettings};
use crate::orderbook::Side;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// How the controller picks the side to spoof each cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SidePolicy {
    /// Always spoof the bid side
    #[default]
    FixedBuy,
    /// Always spoof the ask side
    FixedSell,
    /// Buy on odd cycle numbers, sell on even ones (cycles count from 1)
    Alternating,
}

impl SidePolicy {
    /// Spoof side for cycle number `sequence`
    pub fn side_for(&self, sequence: u64) -> Side {
        match self {
            SidePolicy::FixedBuy => Side::Buy,
            SidePolicy::FixedSell => Side::Sell,
            SidePolicy::Alternating if sequence % 2 == 1 => Side::Buy,
            SidePolicy::Alternating => Side::Sell,
        }
    }
}

/// Tunables of the spoof cycle.
///
/// Durations are written as seconds (integer or fractional) in files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpoofConfig {
    /// Instrument label used in logs
    pub symbol: String,
    /// Number of spoof price levels per cycle
    pub layers: u32,
    /// Quantity of each spoof order
    pub layer_size: Decimal,
    /// Price distance between consecutive layers
    pub offset: Decimal,
    /// Wait after the genuine order before cancelling the spoofs
    #[serde(with = "duration_secs")]
    pub hold: Duration,
    /// Wait between spoof placement and the genuine order
    #[serde(with = "duration_secs")]
    pub delay: Duration,
    /// Wait between cycles
    #[serde(with = "duration_secs")]
    pub pause: Duration,
    /// Quantity of the genuine order
    pub real_size: Decimal,
    /// Minimum price increment, used when clamping a crossing layer
    pub tick_size: Decimal,
    /// Spoof side selection
    pub side_policy: SidePolicy,
    /// Attempts per venue call before the cycle is skipped
    pub max_venue_attempts: u32,
    /// First retry backoff; doubles on every further attempt
    #[serde(with = "duration_secs")]
    pub retry_backoff: Duration,
    /// Stop after this many cycles; run until stopped when absent
    pub max_cycles: Option<u64>,
}

impl Default for SpoofConfig {
    fn default() -> Self {
        Self {
            symbol: "BTC/USDT".to_string(),
            layers: 3,
            layer_size: Decimal::new(5, 0),
            offset: Decimal::new(5, 1),
            hold: Duration::from_millis(200),
            delay: Duration::from_millis(50),
            pause: Duration::from_secs(2),
            real_size: Decimal::new(1, 2),
            tick_size: Decimal::new(1, 2),
            side_policy: SidePolicy::default(),
            max_venue_attempts: 3,
            retry_backoff: Duration::from_millis(100),
            max_cycles: None,
        }
    }
}

impl SpoofConfig {
    /// Check every tunable, reporting the first invalid one
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.layers == 0 {
            return Err(ConfigError::invalid("layers", "must be greater than 0"));
        }
        if self.layer_size <= Decimal::ZERO {
            return Err(ConfigError::invalid("layer_size", "must be positive"));
        }
        if self.offset <= Decimal::ZERO {
            return Err(ConfigError::invalid("offset", "must be positive"));
        }
        if self.real_size <= Decimal::ZERO {
            return Err(ConfigError::invalid("real_size", "must be positive"));
        }
        if self.tick_size <= Decimal::ZERO {
            return Err(ConfigError::invalid("tick_size", "must be positive"));
        }
        if self.max_venue_attempts == 0 {
            return Err(ConfigError::invalid(
                "max_venue_attempts",
                "must be greater than 0",
            ));
        }
        if self.max_cycles == Some(0) {
            return Err(ConfigError::invalid(
                "max_cycles",
                "must be greater than 0 when set",
            ));
        }
        Ok(())
    }
}

/// Complete run configuration as stored in a TOML file
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Exchange implementation to drive
    pub mode: ExchangeMode,
    /// Cycle tunables
    pub spoof: SpoofConfig,
    /// Settings for paper mode
    pub paper: PaperSettings,
}

impl RunConfig {
    /// Load and validate a configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|e| ConfigError::FileRead(e.to_string()))?;
        Self::from_toml(&content)
    }

    /// Parse and validate a configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: RunConfig =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.spoof.validate()?;
        Ok(config)
    }

    /// Save the configuration to a TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?;
        fs::write(path, content).map_err(|e| ConfigError::FileWrite(e.to_string()))
    }
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A tunable is out of range
    Invalid {
        /// Name of the offending field
        field: &'static str,
        /// What is wrong with it
        reason: String,
    },
    /// The file could not be read
    FileRead(String),
    /// The file could not be written
    FileWrite(String),
    /// The file is not valid TOML for this schema
    Parse(String),
    /// The configuration could not be rendered as TOML
    Serialize(String),
}

impl ConfigError {
    fn invalid(field: &'static str, reason: &str) -> Self {
        ConfigError::Invalid {
            field,
            reason: reason.to_string(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Invalid { field, reason } => {
                write!(f, "Invalid configuration: {} {}", field, reason)
            }
            ConfigError::FileRead(msg) => write!(f, "Failed to read config file: {}", msg),
            ConfigError::FileWrite(msg) => write!(f, "Failed to write config file: {}", msg),
            ConfigError::Parse(msg) => write!(f, "Failed to parse config: {}", msg),
            ConfigError::Serialize(msg) => write!(f, "Failed to serialize config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Serde adapter storing a `Duration` as a non-negative number of seconds
mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer, de::Error};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(duration.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let seconds = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(seconds).map_err(|_| {
            D::Error::custom(format!(
                "expected a non-negative number of seconds, got {}",
                seconds
            ))
        })
    }
}
