//! Hostname to IP resolution.

use crate::error::{Error, Result};
use std::net::{IpAddr, ToSocketAddrs};

/// Resolves a hostname to a single address.
pub trait Resolver: Send + Sync {
    fn resolve(&self, host: &str) -> Result<IpAddr>;
}

/// Uses the operating system resolver, preferring the first IPv4 address.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemResolver;

impl Resolver for SystemResolver {
    fn resolve(&self, host: &str) -> Result<IpAddr> {
        let addrs: Vec<IpAddr> = (host, 0)
            .to_socket_addrs()
            .map_err(|e| {
                log::debug!("resolve {host}: {e}");
                Error::Resolve(host.to_string())
            })?
            .map(|sa| sa.ip())
            .collect();

        let ip = addrs
            .iter()
            .find(|ip| ip.is_ipv4())
            .or_else(|| addrs.first())
            .copied()
            .ok_or_else(|| Error::Resolve(host.to_string()))?;
        log::info!("Resolved {host} -> {ip}");
        Ok(ip)
    }
}
