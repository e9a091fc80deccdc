//! Network-info type definitions.

use serde::{Deserialize, Serialize};

/// Re-export from config so callers can name the mode next to the manager
pub use crate::config::NetworkMode;

impl NetworkMode {
    /// Whether the driver should create the bridge for networks in this mode
    pub fn should_create_bridge(&self) -> bool {
        matches!(self, Self::FlatDhcp | Self::Vlan)
    }

    /// Whether the driver should create a VLAN interface
    pub fn should_create_vlan(&self) -> bool {
        matches!(self, Self::Vlan)
    }
}

/// Network-side half of a resolved vif
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkMapping {
    pub bridge: String,
    pub id: u32,
    pub cidr: String,
    pub cidr_v6: Option<String>,
    pub injected: bool,
    pub vlan: Option<u16>,
    pub bridge_interface: String,
    pub multi_host: bool,
}

/// One address as the guest should configure it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IpEntry {
    pub ip: String,
    pub netmask: String,
    pub enabled: String,
}

impl IpEntry {
    pub fn enabled(ip: impl Into<String>, netmask: impl Into<String>) -> Self {
        Self {
            ip: ip.into(),
            netmask: netmask.into(),
            enabled: "1".to_string(),
        }
    }
}

/// Instance-side half of a resolved vif
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkInfoEntry {
    pub label: String,
    pub gateway: String,
    pub dhcp_server: String,
    pub broadcast: String,
    /// MAC address of the vif
    pub mac: String,
    pub vif_uuid: String,
    pub rxtx_cap: u32,
    pub dns: Vec<String>,
    pub ips: Vec<IpEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip6s: Option<Vec<IpEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gateway6: Option<String>,
    pub should_create_bridge: bool,
    pub should_create_vlan: bool,
}

/// Resolved network info of an instance, one pair per vif in vif order
pub type NetworkInfo = Vec<(NetworkMapping, NetworkInfoEntry)>;
