//! IP network (CIDR block) value type and prefix arithmetic.
//!
//! Provides [`Network`] for representing IPv4 and IPv6 blocks as a base
//! address plus prefix length, along with the bit helpers used to build
//! supernets and test containment.

use crate::error::{Error, Result};
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

/// Maximum prefix length for an IPv4 network.
pub const MAX_LENGTH_V4: u8 = 32;
/// Maximum prefix length for an IPv6 network.
pub const MAX_LENGTH_V6: u8 = 128;

/// Prefix width of the address family `addr` belongs to.
pub fn max_length(addr: &IpAddr) -> u8 {
    match addr {
        IpAddr::V4(_) => MAX_LENGTH_V4,
        IpAddr::V6(_) => MAX_LENGTH_V6,
    }
}

fn addr_bits(addr: &IpAddr) -> u128 {
    match addr {
        IpAddr::V4(a) => u32::from(*a) as u128,
        IpAddr::V6(a) => u128::from(*a),
    }
}

fn bits_to_addr(bits: u128, like: &IpAddr) -> IpAddr {
    match like {
        IpAddr::V4(_) => IpAddr::V4(Ipv4Addr::from(bits as u32)),
        IpAddr::V6(_) => IpAddr::V6(Ipv6Addr::from(bits)),
    }
}

/// Bits below the prefix (the host part) for a family of width `max`.
///
/// # Examples
/// ```
/// use asn_route_summary::models::host_mask;
/// assert_eq!(host_mask(24, 32).unwrap(), 0xFF);
/// ```
pub fn host_mask(len: u8, max: u8) -> Result<u128> {
    if len > max {
        return Err(Error::InvalidNetwork(format!(
            "prefix length /{len} is longer than /{max}"
        )));
    }
    let right_len = u32::from(max - len);
    Ok(if right_len >= 128 {
        u128::MAX
    } else {
        (1u128 << right_len) - 1
    })
}

/// Convert a prefix length to a mask for a family of width `max`.
///
/// # Examples
/// ```
/// use asn_route_summary::models::get_cidr_mask;
/// assert_eq!(get_cidr_mask(24, 32).unwrap(), 0xFFFFFF00);
/// ```
pub fn get_cidr_mask(len: u8, max: u8) -> Result<u128> {
    let all_bits = host_mask(0, max)?;
    Ok(all_bits & !host_mask(len, max)?)
}

/// Get the network address for a given IP and prefix length.
pub fn cut_addr(addr: IpAddr, len: u8) -> Result<IpAddr> {
    let mask = get_cidr_mask(len, max_length(&addr))?;
    Ok(bits_to_addr(addr_bits(&addr) & mask, &addr))
}

/// Calculate the broadcast (highest) address for a given IP and prefix length.
pub fn broadcast_addr(addr: IpAddr, len: u8) -> Result<IpAddr> {
    let host = host_mask(len, max_length(&addr))?;
    Ok(bits_to_addr(addr_bits(&addr) | host, &addr))
}

/// Dotted-quad subnet mask for an IPv4 prefix length, e.g. 24 -> 255.255.255.0.
pub fn netmask_v4(len: u8) -> Result<Ipv4Addr> {
    let mask = get_cidr_mask(len, MAX_LENGTH_V4)?;
    Ok(Ipv4Addr::from(mask as u32))
}

/// An IPv4 or IPv6 network in CIDR notation.
///
/// The base address never has host bits set; constructors reject or clear
/// them. Ordering is by address (IPv4 before IPv6) and then prefix length.
#[derive(PartialEq, Eq, PartialOrd, Ord, Debug, Copy, Clone, Hash)]
pub struct Network {
    addr: IpAddr,
    prefix: u8,
}

impl Network {
    /// Create a network, rejecting host bits and out-of-range prefixes.
    pub fn new(addr: IpAddr, prefix: u8) -> Result<Network> {
        let base = cut_addr(addr, prefix)?;
        if base != addr {
            return Err(Error::InvalidNetwork(format!(
                "{addr}/{prefix} has host bits set"
            )));
        }
        Ok(Network { addr, prefix })
    }

    /// Create a network, clearing any host bits in `addr`.
    pub fn truncate(addr: IpAddr, prefix: u8) -> Result<Network> {
        let addr = cut_addr(addr, prefix)?;
        Ok(Network { addr, prefix })
    }

    /// Single-address network (/32 or /128).
    pub fn host(addr: IpAddr) -> Network {
        Network {
            prefix: max_length(&addr),
            addr,
        }
    }

    /// Base (network) address.
    pub fn addr(&self) -> IpAddr {
        self.addr
    }

    pub fn prefix(&self) -> u8 {
        self.prefix
    }

    pub fn is_ipv4(&self) -> bool {
        self.addr.is_ipv4()
    }

    /// Prefix width of this network's family.
    pub fn max_length(&self) -> u8 {
        max_length(&self.addr)
    }

    /// Number of addresses in the block.
    ///
    /// The IPv6 /0 block holds 2^128 addresses and saturates to `u128::MAX`.
    pub fn num_addresses(&self) -> u128 {
        let right_len = u32::from(self.max_length() - self.prefix);
        1u128.checked_shl(right_len).unwrap_or(u128::MAX)
    }

    /// Highest address in the block.
    pub fn broadcast(&self) -> IpAddr {
        bits_to_addr(addr_bits(&self.addr) | self.host_bits(), &self.addr)
    }

    /// The block one prefix bit larger, of which this network is one half.
    ///
    /// Returns `None` at prefix 0.
    pub fn supernet(&self) -> Option<Network> {
        let prefix = self.prefix.checked_sub(1)?;
        let mask = !(1u128 << u32::from(self.max_length() - prefix - 1));
        Some(Network {
            addr: bits_to_addr(addr_bits(&self.addr) & mask, &self.addr),
            prefix,
        })
    }

    /// True when `ip` lies inside the block.
    pub fn contains(&self, ip: IpAddr) -> bool {
        if ip.is_ipv4() != self.is_ipv4() {
            return false;
        }
        addr_bits(&ip) & !self.host_bits() == addr_bits(&self.addr)
    }

    /// True when every address of `self` lies in `other`.
    ///
    /// Reflexive (a network is a subnet of itself) and always false across
    /// address families.
    pub fn subnet_of(&self, other: &Network) -> bool {
        self.prefix >= other.prefix && other.contains(self.addr)
    }

    /// Dotted subnet mask, IPv4 only.
    pub fn netmask(&self) -> Option<Ipv4Addr> {
        match self.addr {
            IpAddr::V4(_) => netmask_v4(self.prefix).ok(),
            IpAddr::V6(_) => None,
        }
    }

    fn host_bits(&self) -> u128 {
        let right_len = u32::from(self.max_length() - self.prefix);
        if right_len >= 128 {
            u128::MAX
        } else {
            (1u128 << right_len) - 1
        }
    }
}

impl FromStr for Network {
    type Err = Error;

    /// Parse strict CIDR text (`address/prefix`); host bits are an error.
    fn from_str(s: &str) -> Result<Network> {
        let s = s.trim();
        let (addr, prefix) = s
            .split_once('/')
            .ok_or_else(|| Error::InvalidNetwork(s.to_string()))?;
        let addr: IpAddr = addr
            .parse()
            .map_err(|_| Error::InvalidNetwork(format!("invalid address {addr} in {s}")))?;
        let prefix: u8 = prefix
            .parse()
            .map_err(|_| Error::InvalidNetwork(format!("invalid prefix length in {s}")))?;
        if prefix > max_length(&addr) {
            return Err(Error::InvalidNetwork(format!(
                "prefix length out of range in {s}"
            )));
        }
        Network::new(addr, prefix)
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}", self.addr, self.prefix)
    }
}

impl Serialize for Network {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Network {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Network, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
