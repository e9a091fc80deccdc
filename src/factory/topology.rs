//! A whole fake topology, materialized at once.

use super::{fake_network, fixed_ips, flavor, vifs};
use crate::model::{FixedIp, Flavor, Network, VirtualInterface};
use serde::{Deserialize, Serialize};

/// Every record of one generated topology
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FakeTopology {
    pub networks: Vec<Network>,
    pub fixed_ips: Vec<FixedIp>,
    pub virtual_interfaces: Vec<VirtualInterface>,
    pub flavor: Flavor,
}

impl FakeTopology {
    /// Generate `num_networks` networks with one vif each and
    /// `ips_per_network` fixed IPs on every network
    pub fn generate(num_networks: u32, ips_per_network: u32, floating_per_fixed: u32) -> Self {
        log::debug!(
            "Generating fake topology: {} networks, {} ips per network, {} floating ips per fixed ip",
            num_networks,
            ips_per_network,
            floating_per_fixed
        );

        Self {
            networks: (0..num_networks).map(|id| fake_network(id, None)).collect(),
            fixed_ips: fixed_ips(num_networks, ips_per_network, floating_per_fixed).collect(),
            virtual_interfaces: vifs(num_networks).collect(),
            flavor: flavor(),
        }
    }

    /// Fixed IPs living on the given network
    pub fn fixed_ips_on(&self, network_id: u32) -> impl Iterator<Item = &FixedIp> {
        self.fixed_ips.iter().filter(move |f| f.network_id == network_id)
    }
}
