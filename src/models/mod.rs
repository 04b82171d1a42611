//! Domain models for AS route summaries.
//!
//! This module contains the core data structures used throughout the application:
//! - [`Network`] - IPv4/IPv6 network with CIDR notation support
//! - [`AsInfo`] - Autonomous System record from the AS lookup service

mod as_info;
mod network;

// Re-export public types
pub use as_info::AsInfo;
pub use network::{
    broadcast_addr, cut_addr, get_cidr_mask, host_mask, max_length, netmask_v4, Network,
    MAX_LENGTH_V4, MAX_LENGTH_V6,
};
