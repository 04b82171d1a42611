//! Tolerance-gated aggregation of sibling networks into supernets.

use crate::error::Result;
use crate::models::Network;
use colored::Colorize;

/// Merge networks into their common supernets until nothing changes.
///
/// Each round sorts the working set, then pairs every network `A` with the
/// first later network that lies inside `A`'s one-bit-larger supernet and
/// whose address count differs from `A`'s by at most `tolerance`. The pair
/// is replaced by that supernet. Rounds repeat until one merges nothing.
///
/// All networks should belong to one address family. Networks of different
/// families never contain each other, so a mixed input is merged per family.
///
/// # Examples
/// ```
/// use asn_route_summary::models::Network;
/// use asn_route_summary::processing::merge_networks;
///
/// let nets: Vec<Network> = ["10.0.0.0/24", "10.0.1.0/24"]
///     .iter()
///     .map(|s| s.parse().unwrap())
///     .collect();
/// let merged = merge_networks(&nets, 0);
/// assert_eq!(merged[0].to_string(), "10.0.0.0/23");
/// ```
pub fn merge_networks(networks: &[Network], tolerance: u128) -> Vec<Network> {
    merge_fixed_point(networks, tolerance).0
}

/// Parse CIDR strings and merge them, see [`merge_networks`].
pub fn merge_cidrs(cidrs: &[&str], tolerance: u128) -> Result<Vec<Network>> {
    let networks = cidrs
        .iter()
        .map(|s| s.parse())
        .collect::<Result<Vec<Network>>>()?;
    Ok(merge_networks(&networks, tolerance))
}

/// Returns the merged networks and the number of rounds run.
fn merge_fixed_point(networks: &[Network], tolerance: u128) -> (Vec<Network>, usize) {
    let mut merged = networks.to_vec();
    merged.sort();
    let mut rounds = 0;

    loop {
        rounds += 1;
        let mut new_merged = merge_round(&merged, tolerance);
        log::debug!(
            "merge round {rounds}: {before} -> {after} networks (tolerance={tolerance})",
            before = merged.len(),
            after = new_merged.len(),
        );
        if new_merged.len() == merged.len() {
            break;
        }
        new_merged.sort();
        merged = new_merged;
    }

    (merged, rounds)
}

/// One left-to-right pass over a sorted slice.
fn merge_round(merged: &[Network], tolerance: u128) -> Vec<Network> {
    let mut out = Vec::with_capacity(merged.len());
    let mut consumed = vec![false; merged.len()];

    for (i, a) in merged.iter().enumerate() {
        if consumed[i] {
            continue;
        }

        // Prefix 0 has no supernet, so `a` can only pass through.
        let partner = a.supernet().and_then(|supernet| {
            merged
                .iter()
                .enumerate()
                .skip(i + 1)
                .filter(|(j, _)| !consumed[*j])
                .find(|(_, b)| {
                    b.subnet_of(&supernet)
                        && b.num_addresses().abs_diff(a.num_addresses()) <= tolerance
                })
                .map(|(j, b)| (j, *b, supernet))
        });

        match partner {
            Some((j, b, supernet)) => {
                log::trace!(
                    "merge {a} + {b} => {supernet}",
                    supernet = supernet.to_string().green()
                );
                consumed[j] = true;
                out.push(supernet);
            }
            None => out.push(*a),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn nets(cidrs: &[&str]) -> Vec<Network> {
        cidrs.iter().map(|s| s.parse().unwrap()).collect()
    }

    #[test]
    fn test_merge_equal_siblings() {
        let result = merge_networks(&nets(&["10.0.0.0/24", "10.0.1.0/24"]), 0);
        assert_eq!(result, nets(&["10.0.0.0/23"]));
    }

    #[test]
    fn test_merge_non_siblings_unchanged() {
        let input = nets(&["10.0.0.0/24", "10.0.2.0/24"]);
        assert_eq!(merge_networks(&input, 0), input);
    }

    #[test]
    fn test_merge_misaligned_neighbours_unchanged() {
        // Adjacent but under different /23 supernets.
        let input = nets(&["10.0.1.0/24", "10.0.2.0/24"]);
        assert_eq!(merge_networks(&input, 0), input);
    }

    #[test]
    fn test_merge_empty() {
        assert!(merge_networks(&[], 5).is_empty());
    }

    #[test]
    fn test_merge_then_filter_halves() {
        let merged = merge_networks(&nets(&["10.0.0.0/25", "10.0.0.128/25"]), 0);
        let filtered = crate::processing::filter_nested(&merged, Default::default());
        assert_eq!(filtered, nets(&["10.0.0.0/24"]));
    }

    #[test]
    fn test_merge_multiple_rounds() {
        let input = nets(&["10.0.3.0/24", "10.0.1.0/24", "10.0.2.0/24", "10.0.0.0/24"]);
        let (result, rounds) = merge_fixed_point(&input, 0);
        assert_eq!(result, nets(&["10.0.0.0/22"]));
        assert_eq!(rounds, 3);
    }

    #[test]
    fn test_merge_round_bound() {
        let input: Vec<Network> = (0..8)
            .map(|i| format!("10.1.{i}.0/24").parse().unwrap())
            .collect();
        let (result, rounds) = merge_fixed_point(&input, 0);
        assert_eq!(result, nets(&["10.1.0.0/21"]));
        // ceil(log2(8)) + 1
        assert!(rounds <= 4, "rounds={rounds}");
    }

    #[test]
    fn test_merge_tolerance_gates_unequal_sizes() {
        let input = nets(&["10.0.0.0/24", "10.0.1.0/25"]);
        assert_eq!(merge_networks(&input, 127), input);
        assert_eq!(merge_networks(&input, 128), nets(&["10.0.0.0/23"]));
    }

    #[test]
    fn test_merge_first_eligible_partner_wins() {
        let input = nets(&["10.0.1.0/24", "10.0.0.128/25", "10.0.0.0/24"]);
        let result = merge_networks(&input, 128);
        assert_eq!(result, nets(&["10.0.0.0/23", "10.0.1.0/24"]));
    }

    #[test]
    fn test_merge_duplicates_collapse_into_supernet() {
        let result = merge_networks(&nets(&["10.0.0.0/24", "10.0.0.0/24"]), 0);
        assert_eq!(result, nets(&["10.0.0.0/23"]));
    }

    #[test]
    fn test_merge_prefix_zero_is_ineligible() {
        let input = nets(&["0.0.0.0/0", "0.0.0.0/0"]);
        assert_eq!(merge_networks(&input, u128::MAX), input);

        let input = nets(&["0.0.0.0/1", "128.0.0.0/1"]);
        assert_eq!(merge_networks(&input, 0), nets(&["0.0.0.0/0"]));
    }

    #[test]
    fn test_merge_ipv6_siblings() {
        let result = merge_networks(&nets(&["2001:db8:1::/48", "2001:db8::/48"]), 0);
        assert_eq!(result, nets(&["2001:db8::/47"]));
    }

    #[test]
    fn test_merge_mixed_families_never_pair() {
        let input = nets(&["::/1", "0.0.0.0/1"]);
        assert_eq!(merge_networks(&input, u128::MAX), nets(&["0.0.0.0/1", "::/1"]));
    }

    #[test]
    fn test_merge_output_sorted_and_not_larger() {
        let input = nets(&[
            "192.168.4.0/24",
            "10.0.0.0/8",
            "192.168.5.0/24",
            "172.16.0.0/12",
            "10.0.0.0/16",
            "192.168.7.0/24",
        ]);
        for tolerance in [0, 256, 1 << 24] {
            let result = merge_networks(&input, tolerance);
            assert!(result.len() <= input.len());
            assert!(result.windows(2).all(|w| w[0] <= w[1]), "{result:?}");
        }
    }

    #[test]
    fn test_merge_cidrs_rejects_host_bits() {
        assert!(merge_cidrs(&["10.0.0.0/24", "10.0.1.1/24"], 0).is_err());
        assert_eq!(
            merge_cidrs(&["10.0.0.0/24", "10.0.1.0/24"], 0).unwrap(),
            nets(&["10.0.0.0/23"])
        );
    }
}
