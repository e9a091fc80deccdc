//! Virtual interface sequences.

use super::network::fake_network;
use crate::model::VirtualInterface;
use std::iter::FusedIterator;

/// Iterator over one virtual interface per fake network
#[derive(Debug, Clone)]
pub struct Vifs {
    count: u32,
    next: u32,
}

/// Start a virtual interface sequence for networks `0..count`.
///
/// The vif UUID is all zeros except for the decimal index right-aligned in
/// its last group.
///
/// The vif id is the network index. That keeps `FixedIp::virtual_interface_id`
/// consistent without a separate id space; it only holds for this fake
/// topology.
pub fn vifs(count: u32) -> Vifs {
    Vifs { count, next: 0 }
}

fn fake_vif(index: u32) -> VirtualInterface {
    VirtualInterface {
        id: index,
        address: format!("DE:AD:BE:EF:00:{:02x}", index),
        uuid: format!("00000000-0000-0000-0000-{:012}", index),
        network_id: index,
        network: fake_network(index, None),
        instance_id: 0,
    }
}

impl Iterator for Vifs {
    type Item = VirtualInterface;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.count {
            return None;
        }
        let vif = fake_vif(self.next);
        self.next += 1;
        Some(vif)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count.saturating_sub(self.next) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Vifs {}

impl FusedIterator for Vifs {}
