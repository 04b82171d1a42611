//! Whois lookups and name resolution.
//!
//! This module handles everything that talks to the outside world:
//! - [`cli`] - Running the system whois client
//! - [`source`] - The [`WhoisSource`] seam and its shell backend
//! - [`cymru`] - AS information queries and reply parsing
//! - [`radb`] - Route object queries and reply parsing
//! - [`resolve`] - Hostname resolution

mod cli;
mod cymru;
mod radb;
mod resolve;
mod source;

// Re-export public types and functions
pub use cli::run;
pub use cymru::{as_info_query, fetch_as_info, parse_as_info};
pub use radb::{fetch_routes, parse_routes, routes_query};
pub use resolve::{Resolver, SystemResolver};
pub use source::{ShellWhois, WhoisSource};
