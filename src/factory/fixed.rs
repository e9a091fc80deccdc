//! Fixed IP sequences.

use super::floating::floating_ips;
use crate::model::FixedIp;
use std::iter::FusedIterator;

/// Row-major iterator over the fixed IPs of a fake topology
/// (network index outer, ip index inner)
#[derive(Debug, Clone)]
pub struct FixedIps {
    num_networks: u32,
    num_ips: u32,
    num_floating_ips: u32,
    network_index: u32,
    ip_index: u32,
}

/// Start a fixed IP sequence of `num_networks * num_ips` records.
///
/// Record `(n, i)` gets id `n * num_ips + i` and address `192.168.{n}.1{i:02}`.
/// Its floating IP list holds the first `num_floating_ips` entries of
/// [`floating_ips`] for that id, materialized up front.
pub fn fixed_ips(num_networks: u32, num_ips: u32, num_floating_ips: u32) -> FixedIps {
    FixedIps {
        num_networks,
        num_ips,
        num_floating_ips,
        network_index: 0,
        ip_index: 0,
    }
}

impl FixedIps {
    fn is_done(&self) -> bool {
        self.num_ips == 0 || self.network_index >= self.num_networks
    }
}

impl Iterator for FixedIps {
    type Item = FixedIp;

    fn next(&mut self) -> Option<Self::Item> {
        if self.is_done() {
            return None;
        }

        let network_index = self.network_index;
        let ip_index = self.ip_index;
        let fixed_ip_id = network_index * self.num_ips + ip_index;

        self.ip_index += 1;
        if self.ip_index == self.num_ips {
            self.ip_index = 0;
            self.network_index += 1;
        }

        let floating = floating_ips(fixed_ip_id)
            .take(self.num_floating_ips as usize)
            .collect();

        Some(FixedIp {
            id: fixed_ip_id,
            network_id: network_index,
            address: format!("192.168.{}.1{:02}", network_index, ip_index),
            instance_id: 0,
            allocated: false,
            // Vif and network ids coincide in the fake topology, see `vifs`
            virtual_interface_id: network_index,
            floating_ips: floating,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.is_done() {
            return (0, Some(0));
        }
        let total = self.num_networks as usize * self.num_ips as usize;
        let done = self.network_index as usize * self.num_ips as usize + self.ip_index as usize;
        let remaining = total.saturating_sub(done);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for FixedIps {}

impl FusedIterator for FixedIps {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::floating::FLOATING_IPS_PER_FIXED_IP;
    use std::collections::HashSet;

    #[test]
    fn test_row_major_ids() {
        for (networks, ips) in [(1u32, 1u32), (1, 2), (3, 4), (5, 1)] {
            let records: Vec<_> = fixed_ips(networks, ips, 0).collect();
            assert_eq!(records.len(), (networks * ips) as usize);

            let mut expected = Vec::new();
            for n in 0..networks {
                for i in 0..ips {
                    expected.push((n * ips + i, n));
                }
            }
            let actual: Vec<_> = records.iter().map(|r| (r.id, r.network_id)).collect();
            assert_eq!(actual, expected);

            let unique: HashSet<_> = records.iter().map(|r| r.id).collect();
            assert_eq!(unique.len(), records.len());
        }
    }

    #[test]
    fn test_address_encodes_indices() {
        let records: Vec<_> = fixed_ips(2, 3, 0).collect();
        let addresses: Vec<_> = records.iter().map(|r| r.address.as_str()).collect();
        assert_eq!(
            addresses,
            vec![
                "192.168.0.100",
                "192.168.0.101",
                "192.168.0.102",
                "192.168.1.100",
                "192.168.1.101",
                "192.168.1.102",
            ]
        );
        for record in &records {
            assert_eq!(record.virtual_interface_id, record.network_id);
            assert_eq!(record.instance_id, 0);
            assert!(!record.allocated);
        }
    }

    #[test]
    fn test_floating_sublists() {
        for requested in [0u32, 1, 3, 154, 200] {
            for record in fixed_ips(2, 2, requested) {
                let expected = requested.min(FLOATING_IPS_PER_FIXED_IP) as usize;
                assert_eq!(record.floating_ips.len(), expected);
                assert!(record.floating_ips.iter().all(|f| f.fixed_ip_id == record.id));
            }
        }
    }

    #[test]
    fn test_empty_topologies() {
        assert_eq!(fixed_ips(0, 5, 0).count(), 0);
        assert_eq!(fixed_ips(5, 0, 0).count(), 0);
        assert_eq!(fixed_ips(0, 0, 0).len(), 0);
    }

    #[test]
    fn test_exact_size() {
        let mut records = fixed_ips(3, 2, 0);
        assert_eq!(records.len(), 6);
        records.next();
        records.next();
        records.next();
        assert_eq!(records.len(), 3);
    }
}
