//! Record type definitions.
//!
//! These mirror the rows the network manager reads from persistence:
//! networks, fixed and floating addresses, virtual interfaces and the
//! instance flavor.

use serde::{Deserialize, Serialize};

/// One virtual L3 network
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Network {
    pub id: u32,
    pub label: String,
    pub injected: bool,
    pub multi_host: bool,
    pub cidr: String,
    pub cidr_v6: Option<String>,
    pub netmask: String,
    pub netmask_v6: Option<String>,
    pub bridge: String,
    pub bridge_interface: String,
    pub gateway: String,
    pub gateway_v6: Option<String>,
    pub broadcast: String,
    pub dns1: Option<String>,
    pub dns2: Option<String>,
    pub vlan: Option<u16>,
    pub host: Option<String>,
    pub project_id: String,
    pub vpn_public_address: String,
}

/// Compute sizing profile of an instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flavor {
    pub id: u32,
    pub name: String,
    pub memory_mb: u32,
    pub vcpus: u32,
    pub local_gb: u32,
    pub flavor_id: u32,
    pub swap: u32,
    pub rxtx_quota: u32,
    pub rxtx_cap: u32,
}

/// Publicly routable address mapped onto a fixed IP
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloatingIp {
    pub id: u32,
    pub address: String,
    pub fixed_ip_id: u32,
    pub project_id: Option<String>,
    pub auto_assigned: bool,
}

/// Internally routable address bound to a virtual interface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedIp {
    pub id: u32,
    pub network_id: u32,
    pub address: String,
    pub instance_id: u32,
    pub allocated: bool,
    pub virtual_interface_id: u32,
    pub floating_ips: Vec<FloatingIp>,
}

/// Virtual NIC attached to an instance, joined to its network
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VirtualInterface {
    pub id: u32,
    /// MAC address
    pub address: String,
    pub uuid: String,
    pub network_id: u32,
    pub network: Network,
    pub instance_id: u32,
}
