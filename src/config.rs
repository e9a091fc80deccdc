//! Process-wide configuration flags.
//!
//! The factories consult these flags when a caller leaves a setting
//! unspecified (for example whether a fake network carries IPv6 fields).
//! Flags are read-only once the process has looked at them.

use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Environment variable overriding [`Flags::use_ipv6`]
pub const USE_IPV6_ENV: &str = "FAKENET_USE_IPV6";

const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Network manager flavour, deciding which host-side devices a resolved
/// network asks the driver to create
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum NetworkMode {
    /// Plain bridged networking, bridges managed externally
    #[default]
    Flat,
    /// Flat networking with a DHCP server on a managed bridge
    FlatDhcp,
    /// One VLAN and bridge per project
    Vlan,
}

/// Process-wide flags, loadable from YAML
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Flags {
    /// Populate IPv6 fields on networks whose mode is not given explicitly
    pub use_ipv6: bool,
    /// Mode of the network manager driven by the harness
    pub network_manager: NetworkMode,
    /// Default log filter for the binary
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

impl Default for Flags {
    fn default() -> Self {
        Self {
            use_ipv6: false,
            network_manager: NetworkMode::Flat,
            log_level: None,
        }
    }
}

impl Flags {
    /// Defaults with environment overrides applied
    pub fn from_env() -> Self {
        let mut flags = Self::default();
        if let Err(e) = flags.apply_overrides(|key| std::env::var(key).ok()) {
            log::warn!("Ignoring environment override: {}", e);
        }
        flags
    }

    /// Apply overrides from a key-value source (normally the environment)
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ValidationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(USE_IPV6_ENV) {
            self.use_ipv6 = parse_bool_flag(&raw).ok_or_else(|| {
                ValidationError::InvalidFlag(format!("{}={} is not a boolean", USE_IPV6_ENV, raw))
            })?;
        }
        Ok(())
    }

    /// Validate the flags
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(level) = &self.log_level {
            if !LOG_LEVELS.contains(&level.to_lowercase().as_str()) {
                return Err(ValidationError::InvalidLogLevel(level.clone()));
            }
        }
        Ok(())
    }
}

/// Parse the usual spellings of a boolean flag
pub fn parse_bool_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Flag validation errors
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid flag: {0}")]
    InvalidFlag(String),
    #[error("Invalid log level '{0}' (expected one of error, warn, info, debug, trace)")]
    InvalidLogLevel(String),
}

/// Errors installing the process-wide flags
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Process flags were already installed or read")]
    AlreadyInstalled,
}

static FLAGS: OnceLock<Flags> = OnceLock::new();

/// The process-wide flags.
///
/// Falls back to [`Flags::from_env`] when nothing was installed before the
/// first read.
pub fn flags() -> &'static Flags {
    FLAGS.get_or_init(Flags::from_env)
}

/// Install the process-wide flags. Must happen before the first [`flags`]
/// read.
pub fn install_flags(flags: Flags) -> Result<(), ConfigError> {
    FLAGS.set(flags).map_err(|_| ConfigError::AlreadyInstalled)
}
