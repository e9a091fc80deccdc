//! Fake persisted entities.
//!
//! Every record the factories produce is a plain struct with named fields,
//! so consumers read them attribute-style (`vif.network.cidr`). The
//! [`Model`] trait layers mapping-style access (`vif.field("network")`) on
//! top of the same values for code written against the looser shape.

pub mod types;

pub use types::{FixedIp, Flavor, FloatingIp, Network, VirtualInterface};

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Errors raised when reading a record through the mapping interface
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("'{model}' has no attribute '{name}'")]
    NoSuchAttribute { model: &'static str, name: String },
    #[error("Failed to encode '{model}': {source}")]
    Encode {
        model: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Mapping-style read access over a fixed-schema record.
///
/// Values come back as [`serde_json::Value`], so nested associations
/// (floating IPs inside a fixed IP, the network inside a virtual interface)
/// are readable through the same call as scalar fields.
pub trait Model: Serialize {
    /// Entity name used in lookup errors
    const NAME: &'static str;

    /// All fields of this record, keyed by field name
    fn fields(&self) -> Result<BTreeMap<String, Value>, ModelError> {
        let value = serde_json::to_value(self).map_err(|source| ModelError::Encode {
            model: Self::NAME,
            source,
        })?;

        match value {
            Value::Object(map) => Ok(map.into_iter().collect()),
            _ => Ok(BTreeMap::new()),
        }
    }

    /// Read a single field by name
    fn field(&self, name: &str) -> Result<Value, ModelError> {
        self.fields()?
            .remove(name)
            .ok_or_else(|| ModelError::NoSuchAttribute {
                model: Self::NAME,
                name: name.to_string(),
            })
    }

    /// Check whether the record carries a field with this name
    fn has_field(&self, name: &str) -> Result<bool, ModelError> {
        Ok(self.fields()?.contains_key(name))
    }
}

impl Model for Network {
    const NAME: &'static str = "Network";
}

impl Model for Flavor {
    const NAME: &'static str = "Flavor";
}

impl Model for FixedIp {
    const NAME: &'static str = "FixedIp";
}

impl Model for FloatingIp {
    const NAME: &'static str = "FloatingIp";
}

impl Model for VirtualInterface {
    const NAME: &'static str = "VirtualInterface";
}
