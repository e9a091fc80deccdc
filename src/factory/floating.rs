//! Floating IP sequences.

use crate::model::FloatingIp;
use std::iter::FusedIterator;

/// Number of floating IPs generated for every fixed IP
/// (`10.10.10.100` through `10.10.10.253`)
pub const FLOATING_IPS_PER_FIXED_IP: u32 = 154;

/// Iterator over the floating IPs mapped onto one fixed IP
#[derive(Debug, Clone)]
pub struct FloatingIps {
    fixed_ip_id: u32,
    next: u32,
}

/// Start a new floating IP sequence for `fixed_ip_id`.
///
/// Each call yields the same 154 records.
pub fn floating_ips(fixed_ip_id: u32) -> FloatingIps {
    FloatingIps {
        fixed_ip_id,
        next: 0,
    }
}

impl Iterator for FloatingIps {
    type Item = FloatingIp;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= FLOATING_IPS_PER_FIXED_IP {
            return None;
        }

        let id = self.next;
        self.next += 1;

        Some(FloatingIp {
            id,
            address: format!("10.10.10.{}", id + 100),
            fixed_ip_id: self.fixed_ip_id,
            project_id: None,
            auto_assigned: false,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = FLOATING_IPS_PER_FIXED_IP.saturating_sub(self.next) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for FloatingIps {}

impl FusedIterator for FloatingIps {}
