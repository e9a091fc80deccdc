use crate::config::{Flags, USE_IPV6_ENV};
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::{info, warn};
use std::fs::File;
use std::path::Path;

/// Top-level keys understood by [`Flags`]
const KNOWN_KEYS: [&str; 3] = ["use_ipv6", "network_manager", "log_level"];

/// Load and parse flags from a YAML file, then apply environment overrides
pub fn load_flags(flags_path: &Path) -> Result<Flags> {
    info!("Loading flags from: {:?}", flags_path);

    let file = File::open(flags_path)
        .wrap_err_with(|| format!("Failed to open flags file '{}'", flags_path.display()))?;

    let mut flags: Flags = serde_yaml::from_reader(file)
        .wrap_err_with(|| format!("Failed to parse flags file '{}'", flags_path.display()))?;

    if std::env::var_os(USE_IPV6_ENV).is_some() {
        info!("Applying {} override from the environment", USE_IPV6_ENV);
    }
    flags.apply_overrides(|key| std::env::var(key).ok())?;

    flags.validate()?;

    Ok(flags)
}

/// Read just the `log_level` of a flags file, ignoring anything malformed.
///
/// Lets the binary pick its log filter before the full load runs.
pub fn peek_log_level(flags_path: &Path) -> Option<String> {
    let content = std::fs::read_to_string(flags_path).ok()?;
    let document: serde_yaml::Value = serde_yaml::from_str(&content).ok()?;
    document
        .get("log_level")
        .and_then(|level| level.as_str())
        .map(|level| level.to_string())
}

/// Warn about keys in a flags file that nothing reads
pub fn check_flags_compatibility(flags_path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(flags_path)?;
    let document: serde_yaml::Value = serde_yaml::from_str(&content)?;

    let mut unknown = Vec::new();
    if let serde_yaml::Value::Mapping(mapping) = document {
        for key in mapping.keys() {
            if let Some(key) = key.as_str() {
                if !KNOWN_KEYS.contains(&key) {
                    warn!("Flags file sets unknown key '{}', it will be ignored", key);
                    unknown.push(key.to_string());
                }
            }
        }
    }

    Ok(unknown)
}
