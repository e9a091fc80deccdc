//! Flat network manager.
//!
//! Resolves the network info of an instance from whatever [`NetworkDb`] it
//! was constructed with. The manager owns no state beyond its host name and
//! mode; every call reads fresh rows.

use super::types::{IpEntry, NetworkInfo, NetworkInfoEntry, NetworkMapping, NetworkMode};
use crate::db::{DbError, NetworkDb, RequestContext};
use crate::model::{FixedIp, Network, VirtualInterface};
use crate::utils::ip_utils::{ipv6_to_global, AddressError};
use log::{debug, warn};

/// Errors resolving network info
#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    #[error(transparent)]
    Db(#[from] DbError),
    #[error("Invalid address on network {network_id}: {source}")]
    Address {
        network_id: u32,
        #[source]
        source: AddressError,
    },
    #[error("No fixed IP on network {network_id} to serve DHCP for host '{host}'")]
    NoFixedIpForHost { network_id: u32, host: String },
}

/// Network manager bound to one host
#[derive(Debug)]
pub struct NetworkManager<D> {
    host: String,
    mode: NetworkMode,
    db: D,
}

impl<D: NetworkDb> NetworkManager<D> {
    pub fn new(host: impl Into<String>, mode: NetworkMode, db: D) -> Self {
        Self {
            host: host.into(),
            mode,
            db,
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn mode(&self) -> NetworkMode {
        self.mode
    }

    pub fn db(&self) -> &D {
        &self.db
    }

    /// Resolve the network info of an instance.
    ///
    /// Produces one `(mapping, info)` pair per virtual interface, in the
    /// order the data-access layer returns them. `host` is only consulted
    /// for multi-host networks, falling back to the manager's own host.
    pub fn get_instance_nw_info(
        &self,
        ctx: &RequestContext,
        instance_id: u32,
        instance_type_id: u32,
        host: Option<&str>,
    ) -> Result<NetworkInfo, NetworkError> {
        let fixed_ips = self.db.fixed_ip_get_by_instance(ctx, instance_id)?;
        let vifs = self.db.virtual_interface_get_by_instance(ctx, instance_id)?;
        let flavor = self.db.instance_type_get(ctx, instance_type_id)?;

        debug!(
            "Resolving network info for instance {}: {} vifs, {} fixed ips",
            instance_id,
            vifs.len(),
            fixed_ips.len()
        );

        let mut network_info = Vec::with_capacity(vifs.len());
        for vif in &vifs {
            let network = &vif.network;

            let ips: Vec<IpEntry> = fixed_ips
                .iter()
                .filter(|fixed_ip| fixed_ip.network_id == network.id)
                .map(|fixed_ip| IpEntry::enabled(fixed_ip.address.clone(), network.netmask.clone()))
                .collect();
            if ips.is_empty() {
                warn!("Vif {} on network {} has no fixed ips", vif.id, network.id);
            }

            let dhcp_server = self.dhcp_server(network, &fixed_ips, host)?;

            let ip6s = match &network.cidr_v6 {
                Some(cidr_v6) => Some(vec![ipv6_entry(network, cidr_v6, vif)?]),
                None => None,
            };

            let dns: Vec<String> = [&network.dns1, &network.dns2]
                .into_iter()
                .flatten()
                .cloned()
                .collect();

            let mapping = NetworkMapping {
                bridge: network.bridge.clone(),
                id: network.id,
                cidr: network.cidr.clone(),
                cidr_v6: network.cidr_v6.clone(),
                injected: network.injected,
                vlan: network.vlan,
                bridge_interface: network.bridge_interface.clone(),
                multi_host: network.multi_host,
            };

            let info = NetworkInfoEntry {
                label: network.label.clone(),
                gateway: network.gateway.clone(),
                dhcp_server,
                broadcast: network.broadcast.clone(),
                mac: vif.address.clone(),
                vif_uuid: vif.uuid.clone(),
                rxtx_cap: flavor.rxtx_cap,
                dns,
                ips,
                ip6s,
                gateway6: network.gateway_v6.clone(),
                should_create_bridge: self.mode.should_create_bridge(),
                should_create_vlan: self.mode.should_create_vlan(),
            };

            network_info.push((mapping, info));
        }

        Ok(network_info)
    }

    /// Address the DHCP server for `network` listens on
    fn dhcp_server(
        &self,
        network: &Network,
        fixed_ips: &[FixedIp],
        host: Option<&str>,
    ) -> Result<String, NetworkError> {
        if !network.multi_host {
            return Ok(network.gateway.clone());
        }

        let host = host.unwrap_or(self.host.as_str());
        fixed_ips
            .iter()
            .find(|fixed_ip| fixed_ip.network_id == network.id)
            .map(|fixed_ip| fixed_ip.address.clone())
            .ok_or_else(|| NetworkError::NoFixedIpForHost {
                network_id: network.id,
                host: host.to_string(),
            })
    }
}

fn ipv6_entry(network: &Network, cidr_v6: &str, vif: &VirtualInterface) -> Result<IpEntry, NetworkError> {
    let address = ipv6_to_global(cidr_v6, &vif.address).map_err(|source| NetworkError::Address {
        network_id: network.id,
        source,
    })?;

    let netmask = match &network.netmask_v6 {
        Some(netmask) => netmask.clone(),
        None => cidr_v6
            .split_once('/')
            .map(|(_, len)| len.to_string())
            .unwrap_or_default(),
    };

    Ok(IpEntry::enabled(address.to_string(), netmask))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::{fake_network, fixed_ips, flavor, vifs};
    use crate::model::Flavor;

    /// Data-access stub serving fixed rows
    struct StubDb {
        fixed_ips: Vec<FixedIp>,
        vifs: Vec<VirtualInterface>,
        fail_flavor: bool,
    }

    impl NetworkDb for StubDb {
        fn fixed_ip_get_by_instance(&self, _: &RequestContext, _: u32) -> Result<Vec<FixedIp>, DbError> {
            Ok(self.fixed_ips.clone())
        }

        fn virtual_interface_get_by_instance(
            &self,
            _: &RequestContext,
            _: u32,
        ) -> Result<Vec<VirtualInterface>, DbError> {
            Ok(self.vifs.clone())
        }

        fn instance_type_get(&self, _: &RequestContext, id: u32) -> Result<Flavor, DbError> {
            if self.fail_flavor {
                return Err(DbError::NotFound { kind: "Flavor", id });
            }
            Ok(flavor())
        }
    }

    fn stub(num_networks: u32, ips: u32) -> StubDb {
        StubDb {
            fixed_ips: fixed_ips(num_networks, ips, 0).collect(),
            vifs: vifs(num_networks).collect(),
            fail_flavor: false,
        }
    }

    fn v6_vif(index: u32) -> VirtualInterface {
        let mut vif = vifs(index + 1).last().unwrap();
        vif.network = fake_network(index, Some(true));
        vif
    }

    #[test]
    fn test_flat_resolution() {
        let manager = NetworkManager::new("testhost", NetworkMode::Flat, stub(2, 2));
        let info = manager
            .get_instance_nw_info(&RequestContext::default(), 0, 0, None)
            .unwrap();

        assert_eq!(info.len(), 2);
        let (mapping, entry) = &info[1];
        assert_eq!(mapping.id, 1);
        assert_eq!(mapping.bridge, "fake_br1");
        assert_eq!(mapping.cidr, "192.168.1.0/24");
        assert_eq!(entry.label, "test1");
        assert_eq!(entry.gateway, "192.168.1.1");
        assert_eq!(entry.dhcp_server, "192.168.1.1");
        assert_eq!(entry.mac, "DE:AD:BE:EF:00:01");
        assert_eq!(entry.rxtx_cap, 3);
        assert_eq!(entry.dns, vec!["192.168.1.3".to_string(), "192.168.1.4".to_string()]);
        assert_eq!(
            entry.ips,
            vec![
                IpEntry::enabled("192.168.1.100", "255.255.255.0"),
                IpEntry::enabled("192.168.1.101", "255.255.255.0"),
            ]
        );
        assert!(!entry.should_create_bridge);
        assert!(!entry.should_create_vlan);
    }

    #[test]
    fn test_mode_sets_device_flags() {
        let manager = NetworkManager::new("testhost", NetworkMode::Vlan, stub(1, 1));
        assert_eq!(manager.host(), "testhost");
        assert_eq!(manager.mode(), NetworkMode::Vlan);
        assert_eq!(manager.db().vifs.len(), 1);

        let info = manager
            .get_instance_nw_info(&RequestContext::default(), 0, 0, None)
            .unwrap();
        assert!(info[0].1.should_create_bridge);
        assert!(info[0].1.should_create_vlan);
    }

    #[test]
    fn test_ipv6_entries() {
        let mut db = stub(1, 1);
        db.vifs = vec![v6_vif(0)];

        let manager = NetworkManager::new("testhost", NetworkMode::Flat, db);
        let info = manager
            .get_instance_nw_info(&RequestContext::default(), 0, 0, None)
            .unwrap();

        let entry = &info[0].1;
        let ip6s = entry.ip6s.as_ref().unwrap();
        assert_eq!(ip6s.len(), 1);
        assert_eq!(ip6s[0].ip, "2001:db8::dcad:beff:feef:0");
        assert_eq!(ip6s[0].netmask, "64");
        assert_eq!(entry.gateway6.as_deref(), Some("2001:db8:0:0::1"));
        assert_eq!(info[0].0.cidr_v6.as_deref(), Some("2001:db8:0:0::/64"));
    }

    #[test]
    fn test_ipv4_only_has_no_v6_entries() {
        let mut db = stub(1, 1);
        db.vifs[0].network = fake_network(0, Some(false));

        let manager = NetworkManager::new("testhost", NetworkMode::Flat, db);
        let info = manager
            .get_instance_nw_info(&RequestContext::default(), 0, 0, None)
            .unwrap();
        assert!(info[0].1.ip6s.is_none());
        assert!(info[0].1.gateway6.is_none());
    }

    #[test]
    fn test_multi_host_dhcp_uses_local_fixed_ip() {
        let mut db = stub(1, 2);
        db.vifs[0].network.multi_host = true;

        let manager = NetworkManager::new("testhost", NetworkMode::FlatDhcp, db);
        let info = manager
            .get_instance_nw_info(&RequestContext::default(), 0, 0, Some("compute1"))
            .unwrap();
        assert_eq!(info[0].1.dhcp_server, "192.168.0.100");
    }

    #[test]
    fn test_multi_host_without_fixed_ip_fails() {
        let mut db = stub(1, 0);
        db.vifs[0].network.multi_host = true;

        let manager = NetworkManager::new("testhost", NetworkMode::FlatDhcp, db);
        let err = manager
            .get_instance_nw_info(&RequestContext::default(), 0, 0, None)
            .unwrap_err();
        match err {
            NetworkError::NoFixedIpForHost { network_id, host } => {
                assert_eq!(network_id, 0);
                assert_eq!(host, "testhost");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_db_errors_propagate() {
        let mut db = stub(1, 1);
        db.fail_flavor = true;

        let manager = NetworkManager::new("testhost", NetworkMode::Flat, db);
        let err = manager
            .get_instance_nw_info(&RequestContext::default(), 0, 7, None)
            .unwrap_err();
        assert!(matches!(
            err,
            NetworkError::Db(DbError::NotFound { kind: "Flavor", id: 7 })
        ));
    }

    #[test]
    fn test_bad_vif_mac_is_reported() {
        let mut db = stub(1, 1);
        db.vifs = vec![v6_vif(0)];
        db.vifs[0].address = "not-a-mac".to_string();

        let manager = NetworkManager::new("testhost", NetworkMode::Flat, db);
        let err = manager
            .get_instance_nw_info(&RequestContext::default(), 0, 0, None)
            .unwrap_err();
        assert!(matches!(err, NetworkError::Address { network_id: 0, .. }));
    }

    #[test]
    fn test_missing_dns_is_skipped() {
        let mut db = stub(1, 1);
        db.vifs[0].network.dns1 = None;

        let manager = NetworkManager::new("testhost", NetworkMode::Flat, db);
        let info = manager
            .get_instance_nw_info(&RequestContext::default(), 0, 0, None)
            .unwrap();
        assert_eq!(info[0].1.dns, vec!["192.168.0.4".to_string()]);
    }
}
