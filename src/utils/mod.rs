//! Shared utilities: IP validation, wildcard matching, address derivation.

pub mod ip_utils;

pub use ip_utils::{ipv4_like, ipv6_to_global, is_valid_ip, is_valid_ipv4, is_valid_ipv6, AddressError};
