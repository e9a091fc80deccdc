//! Injection harness.
//!
//! Runs network-info resolution against a generated topology instead of a
//! database. [`FakeDb`] stands in for the three lookups the manager makes,
//! and a test-owned [`CallLog`] records what each substitute handed back so
//! the test can assert on it afterwards.
//!
//! ```
//! use fakenet::harness::{fake_get_instance_nw_info, CallLog};
//!
//! let log = CallLog::new();
//! let nw_info = fake_get_instance_nw_info(&log, 3, 2).unwrap();
//!
//! assert_eq!(nw_info.len(), 3);
//! assert_eq!(log.fixed_ips_returned(), 6);
//! ```

use crate::db::{DbError, NetworkDb, RequestContext};
use crate::factory::{fixed_ips, flavor, vifs};
use crate::model::{FixedIp, Flavor, VirtualInterface};
use crate::network::{NetworkError, NetworkInfo, NetworkManager, NetworkMode};
use log::debug;
use std::cell::RefCell;

/// Host every harness-built manager is bound to
pub const HOST: &str = "testhost";

pub const DEFAULT_NUM_NETWORKS: u32 = 1;
pub const DEFAULT_IPS_PER_VIF: u32 = 2;

/// One call into a substituted lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbCall {
    FixedIpsByInstance { instance_id: u32, returned: usize },
    VirtualInterfacesByInstance { instance_id: u32, returned: usize },
    InstanceTypeGet { instance_type_id: u32 },
}

/// Record of substitute invocations, scoped to one test.
///
/// Not `Sync`: a log belongs to the test that created it.
#[derive(Debug, Default)]
pub struct CallLog {
    calls: RefCell<Vec<DbCall>>,
}

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, call: DbCall) {
        debug!("Substituted lookup: {:?}", call);
        self.calls.borrow_mut().push(call);
    }

    /// Every call so far, in order
    pub fn calls(&self) -> Vec<DbCall> {
        self.calls.borrow().clone()
    }

    /// Fixed IPs handed out by the most recent fixed IP lookup
    pub fn fixed_ips_returned(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .rev()
            .find_map(|call| match call {
                DbCall::FixedIpsByInstance { returned, .. } => Some(*returned),
                _ => None,
            })
            .unwrap_or(0)
    }

    /// Virtual interfaces handed out by the most recent vif lookup
    pub fn vifs_returned(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .rev()
            .find_map(|call| match call {
                DbCall::VirtualInterfacesByInstance { returned, .. } => Some(*returned),
                _ => None,
            })
            .unwrap_or(0)
    }

    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }
}

/// Data-access double serving a generated topology.
///
/// Every lookup regenerates its rows, so repeated calls return identical
/// data. Instance and flavor ids are ignored.
#[derive(Debug, Clone, Copy)]
pub struct FakeDb<'a> {
    log: &'a CallLog,
    num_networks: u32,
    ips_per_vif: u32,
}

impl<'a> FakeDb<'a> {
    pub fn new(log: &'a CallLog, num_networks: u32, ips_per_vif: u32) -> Self {
        Self {
            log,
            num_networks,
            ips_per_vif,
        }
    }
}

impl NetworkDb for FakeDb<'_> {
    fn fixed_ip_get_by_instance(
        &self,
        _ctx: &RequestContext,
        instance_id: u32,
    ) -> Result<Vec<FixedIp>, DbError> {
        let rows: Vec<FixedIp> = fixed_ips(self.num_networks, self.ips_per_vif, 0).collect();
        self.log.record(DbCall::FixedIpsByInstance {
            instance_id,
            returned: rows.len(),
        });
        Ok(rows)
    }

    fn virtual_interface_get_by_instance(
        &self,
        _ctx: &RequestContext,
        instance_id: u32,
    ) -> Result<Vec<VirtualInterface>, DbError> {
        let rows: Vec<VirtualInterface> = vifs(self.num_networks).collect();
        self.log.record(DbCall::VirtualInterfacesByInstance {
            instance_id,
            returned: rows.len(),
        });
        Ok(rows)
    }

    fn instance_type_get(&self, _ctx: &RequestContext, instance_type_id: u32) -> Result<Flavor, DbError> {
        self.log.record(DbCall::InstanceTypeGet { instance_type_id });
        Ok(flavor())
    }
}

/// Resolve network info for a fake instance with `num_networks` vifs and
/// `ips_per_vif` fixed IPs on each.
///
/// The manager is always a flat manager bound to [`HOST`], whatever the
/// process-wide flags say. Its result, including any error, is returned
/// untouched.
pub fn fake_get_instance_nw_info(
    log: &CallLog,
    num_networks: u32,
    ips_per_vif: u32,
) -> Result<NetworkInfo, NetworkError> {
    let db = FakeDb::new(log, num_networks, ips_per_vif);
    let manager = NetworkManager::new(HOST, NetworkMode::Flat, db);

    manager.get_instance_nw_info(&RequestContext::default(), 0, 0, None)
}

/// [`fake_get_instance_nw_info`] with one network and two IPs per vif
pub fn fake_get_instance_nw_info_default(log: &CallLog) -> Result<NetworkInfo, NetworkError> {
    fake_get_instance_nw_info(log, DEFAULT_NUM_NETWORKS, DEFAULT_IPS_PER_VIF)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_topology() {
        let log = CallLog::new();
        let nw_info = fake_get_instance_nw_info_default(&log).unwrap();

        assert_eq!(nw_info.len(), 1);
        assert_eq!(log.vifs_returned(), 1);
        assert_eq!(log.fixed_ips_returned(), 2);

        let ips: Vec<_> = nw_info[0].1.ips.iter().map(|ip| ip.ip.as_str()).collect();
        assert_eq!(ips, vec!["192.168.0.100", "192.168.0.101"]);
    }

    #[test]
    fn test_substitutes_are_all_called_once() {
        let log = CallLog::new();
        fake_get_instance_nw_info(&log, 2, 1).unwrap();

        assert_eq!(
            log.calls(),
            vec![
                DbCall::FixedIpsByInstance { instance_id: 0, returned: 2 },
                DbCall::VirtualInterfacesByInstance { instance_id: 0, returned: 2 },
                DbCall::InstanceTypeGet { instance_type_id: 0 },
            ]
        );

        log.clear();
        assert!(log.calls().is_empty());
        assert_eq!(log.fixed_ips_returned(), 0);
    }

    #[test]
    fn test_fake_db_ignores_lookup_arguments() {
        let log = CallLog::new();
        let db = FakeDb::new(&log, 2, 3);
        let ctx = RequestContext::default();

        let a = db.fixed_ip_get_by_instance(&ctx, 0).unwrap();
        let b = db.fixed_ip_get_by_instance(&ctx, 99).unwrap();
        assert_eq!(a, b);
        assert!(a.iter().all(|f| f.floating_ips.is_empty()));

        assert_eq!(db.instance_type_get(&ctx, 42).unwrap(), flavor());
        assert_eq!(db.virtual_interface_get_by_instance(&ctx, 5).unwrap().len(), 2);
    }

    #[test]
    fn test_zero_networks_resolves_to_nothing() {
        let log = CallLog::new();
        let nw_info = fake_get_instance_nw_info(&log, 0, 2).unwrap();
        assert!(nw_info.is_empty());
    }
}
