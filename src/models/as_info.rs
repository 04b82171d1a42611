//! Autonomous System record returned by the AS lookup service.

use serde::{Deserialize, Serialize};

/// One row of an AS-info whois reply.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct AsInfo {
    /// Origin AS number, without the `AS` prefix.
    pub as_number: String,
    /// The queried IP or network as echoed back by the service.
    pub ip: String,
    /// Announced BGP prefix covering the query.
    pub bgp_prefix: String,
    /// Two letter country code.
    pub country: String,
    /// Regional registry (arin, ripencc, ...).
    pub registry: String,
    /// Allocation date.
    pub allocated: String,
    /// Registered AS name.
    pub as_name: String,
}
