//! Data-access capability set used by the network manager.
//!
//! The manager never talks to storage directly; it is handed something
//! implementing [`NetworkDb`]. Production code would back this with a
//! database, tests hand in [`crate::harness::FakeDb`].

use crate::model::{FixedIp, Flavor, VirtualInterface};

/// Caller identity passed through to every data-access call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestContext {
    pub user_id: Option<String>,
    pub project_id: Option<String>,
    pub is_admin: bool,
}

/// Errors raised by a data-access backend
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("{kind} {id} could not be found")]
    NotFound { kind: &'static str, id: u32 },
    #[error("Data access failed: {0}")]
    Backend(String),
}

/// The three lookups network-info resolution depends on
pub trait NetworkDb {
    /// Fixed IPs assigned to an instance, with their floating IPs joined in
    fn fixed_ip_get_by_instance(
        &self,
        ctx: &RequestContext,
        instance_id: u32,
    ) -> Result<Vec<FixedIp>, DbError>;

    /// Virtual interfaces of an instance, with their networks joined in
    fn virtual_interface_get_by_instance(
        &self,
        ctx: &RequestContext,
        instance_id: u32,
    ) -> Result<Vec<VirtualInterface>, DbError>;

    /// Flavor by id
    fn instance_type_get(&self, ctx: &RequestContext, instance_type_id: u32) -> Result<Flavor, DbError>;
}
