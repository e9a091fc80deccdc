//! IP utility functions for validation, matching and address derivation.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Errors deriving an address from its parts
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AddressError {
    #[error("Invalid IPv6 prefix '{0}'")]
    InvalidPrefix(String),
    #[error("Invalid MAC address '{0}'")]
    InvalidMac(String),
}

/// Check if a string is a valid IP address (IPv4 or IPv6)
pub fn is_valid_ip(ip: &str) -> bool {
    ip.parse::<IpAddr>().is_ok()
}

/// Check if a string is a valid IPv4 address
pub fn is_valid_ipv4(ip: &str) -> bool {
    ip.parse::<Ipv4Addr>().is_ok()
}

/// Check if a string is a valid IPv6 address
pub fn is_valid_ipv6(ip: &str) -> bool {
    ip.parse::<Ipv6Addr>().is_ok()
}

/// Check whether a dotted-quad address matches a pattern such as `192.168.*.*`.
///
/// Octets are compared left to right as text; a `*` pattern octet matches
/// anything. Stops at the first mismatch.
///
/// # Panics
///
/// Panics if `pattern` has more octets than `ip`. Both are expected to be
/// four-octet quads.
///
/// # Examples
/// ```
/// use fakenet::utils::ip_utils::ipv4_like;
///
/// assert!(ipv4_like("192.168.1.5", "192.168.*.*"));
/// assert!(!ipv4_like("192.168.1.5", "192.168.2.*"));
/// ```
pub fn ipv4_like(ip: &str, pattern: &str) -> bool {
    let octets: Vec<&str> = ip.split('.').collect();

    for (i, octet) in pattern.split('.').enumerate() {
        if octet == "*" {
            continue;
        }
        if octet != octets[i] {
            return false;
        }
    }
    true
}

/// Parse a MAC address written as six hex octets separated by `:` or `-`
pub fn parse_mac(mac: &str) -> Result<[u8; 6], AddressError> {
    let parts: Vec<&str> = mac.split(|c: char| c == ':' || c == '-').collect();
    if parts.len() != 6 {
        return Err(AddressError::InvalidMac(mac.to_string()));
    }

    let mut bytes = [0u8; 6];
    for (byte, part) in bytes.iter_mut().zip(parts) {
        if part.is_empty() || part.len() > 2 {
            return Err(AddressError::InvalidMac(mac.to_string()));
        }
        *byte = u8::from_str_radix(part, 16).map_err(|_| AddressError::InvalidMac(mac.to_string()))?;
    }
    Ok(bytes)
}

/// Modified EUI-64 interface identifier of a MAC address (RFC 4291 appendix A)
pub fn eui64(mac: [u8; 6]) -> u64 {
    u64::from_be_bytes([
        mac[0] ^ 0x02,
        mac[1],
        mac[2],
        0xff,
        0xfe,
        mac[3],
        mac[4],
        mac[5],
    ])
}

/// Global IPv6 address of an interface, built from a `addr/len` prefix and
/// the interface MAC (SLAAC style)
pub fn ipv6_to_global(prefix: &str, mac: &str) -> Result<Ipv6Addr, AddressError> {
    let base = prefix.split_once('/').map_or(prefix, |(base, _)| base);
    let base: Ipv6Addr = base
        .parse()
        .map_err(|_| AddressError::InvalidPrefix(prefix.to_string()))?;

    let interface_id = eui64(parse_mac(mac)?);
    Ok(Ipv6Addr::from(u128::from(base) | u128::from(interface_id)))
}
