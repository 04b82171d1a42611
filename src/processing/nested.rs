//! Removal of networks nested inside other networks of the same list.

use crate::models::Network;
use serde::{Deserialize, Serialize};

/// What to do with exact duplicates when filtering nested networks.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Equal copies never exclude each other, all copies survive.
    #[default]
    Retain,
    /// Only the first of several equal copies survives.
    Collapse,
}

/// Drop every network contained in a different network of the same list.
///
/// Survivors keep their input order. Running the filter on its own output
/// changes nothing.
///
/// # Arguments
/// * `networks` - The networks to filter, in display order
/// * `policy` - Handling of exact duplicates
pub fn filter_nested(networks: &[Network], policy: DuplicatePolicy) -> Vec<Network> {
    let mut filtered: Vec<Network> = Vec::with_capacity(networks.len());

    for net in networks {
        if let Some(outer) = networks
            .iter()
            .find(|other| *other != net && net.subnet_of(other))
        {
            log::debug!("Excluding {net} nested in {outer}");
            continue;
        }
        if policy == DuplicatePolicy::Collapse && filtered.contains(net) {
            log::debug!("Excluding duplicate {net}");
            continue;
        }
        filtered.push(*net);
    }

    let removed = networks.len() - filtered.len();
    if removed > 0 {
        log::info!(
            "Filtered out {removed} nested networks, {} remain",
            filtered.len()
        );
    }

    filtered
}
