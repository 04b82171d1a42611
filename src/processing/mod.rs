//! Network list processing.
//!
//! This module contains the aggregation core:
//! - [`merge`] - Tolerance-gated merging of sibling networks
//! - [`nested`] - Removal of networks contained in other networks

mod merge;
mod nested;

// Re-export public functions
pub use merge::{merge_cidrs, merge_networks};
pub use nested::{filter_nested, DuplicatePolicy};

use crate::models::Network;

/// Aggregate (when `merge` is set) and then filter a route list.
///
/// Networks are grouped by address family so the merge never sees a mixed
/// list; IPv4 results come before IPv6 results.
pub fn summarize(
    networks: &[Network],
    merge: bool,
    tolerance: u128,
    policy: DuplicatePolicy,
) -> Vec<Network> {
    let (v4, v6): (Vec<Network>, Vec<Network>) =
        networks.iter().partition(|net| net.is_ipv4());

    let mut result = Vec::with_capacity(networks.len());
    for family in [v4, v6] {
        if family.is_empty() {
            continue;
        }
        let merged = if merge {
            merge_networks(&family, tolerance)
        } else {
            family
        };
        result.extend(filter_nested(&merged, policy));
    }
    result
}
