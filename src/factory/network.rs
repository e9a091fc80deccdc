//! Fake network rows.

use crate::config;
use crate::model::Network;

/// Project owning every fake network
pub const FAKE_PROJECT_ID: &str = "fake_project";

/// Build the fake network with the given id.
///
/// Every IPv4 field lives in `192.168.{id}.0/24`. IPv6 fields are filled in
/// only when `ipv6` is true, or when it is `None` and the process-wide
/// `use_ipv6` flag is set; the id becomes the fourth hextet of the
/// `2001:db8::/48` documentation prefix.
pub fn fake_network(network_id: u32, ipv6: Option<bool>) -> Network {
    let ipv6 = ipv6.unwrap_or_else(|| config::flags().use_ipv6);

    let mut network = Network {
        id: network_id,
        label: format!("test{}", network_id),
        injected: false,
        multi_host: false,
        cidr: format!("192.168.{}.0/24", network_id),
        cidr_v6: None,
        netmask: "255.255.255.0".to_string(),
        netmask_v6: None,
        bridge: format!("fake_br{}", network_id),
        bridge_interface: format!("fake_eth{}", network_id),
        gateway: format!("192.168.{}.1", network_id),
        gateway_v6: None,
        broadcast: format!("192.168.{}.255", network_id),
        dns1: Some(format!("192.168.{}.3", network_id)),
        dns2: Some(format!("192.168.{}.4", network_id)),
        vlan: None,
        host: None,
        project_id: FAKE_PROJECT_ID.to_string(),
        vpn_public_address: format!("192.168.{}.2", network_id),
    };

    if ipv6 {
        network.cidr_v6 = Some(format!("2001:db8:0:{:x}::/64", network_id));
        network.gateway_v6 = Some(format!("2001:db8:0:{:x}::1", network_id));
        network.netmask_v6 = Some("64".to_string());
    }

    network
}
