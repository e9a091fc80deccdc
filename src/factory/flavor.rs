//! The single fake flavor.

use crate::model::Flavor;

/// The constant flavor every fake instance is sized with
pub fn flavor() -> Flavor {
    Flavor {
        id: 0,
        name: "fake_flavor".to_string(),
        memory_mb: 2048,
        vcpus: 2,
        local_gb: 10,
        flavor_id: 0,
        swap: 0,
        rxtx_quota: 0,
        rxtx_cap: 3,
    }
}
