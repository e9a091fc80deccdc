//! Record factories.
//!
//! Deterministic generators of fake persistence rows. Single records
//! (a network, the flavor) come from plain functions; related rows come
//! from finite iterators that can be restarted by calling the constructing
//! function again.
//!
//! Every address, MAC and UUID is derived from small integer indices, so
//! two runs with the same parameters produce identical topologies.

pub mod fixed;
pub mod flavor;
pub mod floating;
pub mod network;
pub mod topology;
pub mod vif;

pub use fixed::{fixed_ips, FixedIps};
pub use flavor::flavor;
pub use floating::{floating_ips, FloatingIps, FLOATING_IPS_PER_FIXED_IP};
pub use network::fake_network;
pub use topology::FakeTopology;
pub use vif::{vifs, Vifs};
