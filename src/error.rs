//! Error types for AS route lookups and network aggregation.

use std::io;
use std::result;
use thiserror::Error;

/// Result type used throughout the crate.
pub type Result<T> = result::Result<T, Error>;

/// Error type for lookups, parsing and aggregation.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed network: unparseable text, host bits set or prefix out of range.
    #[error("Invalid network format: {0}")]
    InvalidNetwork(String),

    /// The whois command ran but failed or returned nothing.
    #[error("Error executing whois: {0}")]
    Whois(String),

    /// The whois binary could not be started.
    #[error("Whois command not found: {0}")]
    WhoisNotFound(String),

    /// Query is neither an AS number, an address, a network nor a hostname.
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Hostname did not resolve to any address.
    #[error("Could not resolve IP for domain {0}")]
    Resolve(String),

    /// Invalid configuration value.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A lookup worker panicked or was cancelled.
    #[error("Lookup task failed: {0}")]
    Join(String),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl From<tokio::task::JoinError> for Error {
    fn from(e: tokio::task::JoinError) -> Self {
        Error::Join(e.to_string())
    }
}
