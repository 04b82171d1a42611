//! Look up Autonomous System information and summarize the routes it announces.
//!
//! The aggregation core lives in [`processing`]: [`processing::merge_networks`]
//! folds sibling networks into supernets and [`processing::filter_nested`]
//! drops networks covered by other networks. The rest of the crate feeds it:
//! [`whois`] talks to the AS-info and routing registry servers, [`lookup`]
//! drives a query end to end and [`output`] renders the result.

pub mod config;
pub mod error;
pub mod lookup;
pub mod models;
pub mod output;
pub mod processing;
pub mod whois;

use std::sync::Arc;

pub use config::Config;
pub use error::{Error, Result};
pub use lookup::{Lookup, Report};

/// Build a [`Lookup`] that uses the system whois client and resolver.
pub fn system_lookup(config: Config) -> Lookup {
    let whois = whois::ShellWhois::new(&config.whois_command);
    Lookup::new(config, Arc::new(whois), Arc::new(whois::SystemResolver))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_lookup_uses_configured_command() {
        let config = Config {
            whois_command: "jwhois".to_string(),
            tolerance: 4,
            ..Default::default()
        };
        let lookup = system_lookup(config);
        assert_eq!(lookup.config().whois_command, "jwhois");
        assert_eq!(lookup.config().tolerance, 4);
    }
}
