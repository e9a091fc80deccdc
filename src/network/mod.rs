//! Network manager and the network-info it resolves.
//!
//! The manager turns the raw rows of an instance (fixed IPs, virtual
//! interfaces with their networks, the flavor) into one
//! `(NetworkMapping, NetworkInfoEntry)` pair per virtual interface, which is
//! what a virt driver needs to plug the instance in.

pub mod manager;
pub mod types;

pub use manager::{NetworkError, NetworkManager};
pub use types::{IpEntry, NetworkInfo, NetworkInfoEntry, NetworkMapping, NetworkMode};
