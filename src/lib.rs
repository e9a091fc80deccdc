//! # Fakenet - Synthetic network topology and network-info assembler
//!
//! This library generates deterministic fake infrastructure records and
//! feeds them to a network manager in place of a database, so that
//! network-info resolution can be exercised end to end without storage,
//! a hypervisor or a cloud control plane.
//!
//! ## Overview
//!
//! A fake topology is fully described by a few small integers: how many
//! networks, how many fixed IPs per network and how many floating IPs per
//! fixed IP. Every id, address, MAC and UUID is derived from those indices,
//! so the same parameters always produce the same records.
//!
//! ## Architecture
//!
//! - `model`: fixed-schema records (networks, fixed/floating IPs, vifs,
//!   flavor) with mapping-style field access through the `Model` trait
//! - `factory`: record factories and finite, restartable record iterators
//! - `db`: the `NetworkDb` lookups network-info resolution depends on
//! - `network`: the network manager and the network-info it produces
//! - `harness`: `FakeDb` test double and `fake_get_instance_nw_info`
//! - `config` / `config_loader`: process-wide flags and their YAML loader
//! - `utils`: IP helpers, including the `ipv4_like` wildcard matcher
//!
//! ## Example Usage
//!
//! ```rust
//! use fakenet::harness::{fake_get_instance_nw_info, CallLog};
//!
//! let log = CallLog::new();
//! let nw_info = fake_get_instance_nw_info(&log, 3, 2)?;
//!
//! let cidrs: Vec<_> = nw_info.iter().map(|(mapping, _)| mapping.cidr.as_str()).collect();
//! assert_eq!(cidrs, ["192.168.0.0/24", "192.168.1.0/24", "192.168.2.0/24"]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Flags
//!
//! Flags are read from YAML, with every key optional:
//!
//! ```yaml
//! use_ipv6: true             # IPv6 fields on networks that don't say otherwise
//! network_manager: flat_dhcp # flat, flat_dhcp or vlan
//! log_level: debug
//! ```
//!
//! `FAKENET_USE_IPV6` in the environment overrides `use_ipv6`.
//!
//! ## Error Handling
//!
//! Library operations return typed `thiserror` errors (`NetworkError`,
//! `DbError`, `ModelError`, `ValidationError`). The flags loader and the
//! binary use `color_eyre` for reporting with context.

pub mod config;
pub mod config_loader;
pub mod db;
pub mod factory;
pub mod harness;
pub mod model;
pub mod network;
pub mod utils;
