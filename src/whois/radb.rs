//! Route object lookups against a routing registry (RADb style RPSL replies).

use super::WhoisSource;
use crate::error::Result;
use crate::models::Network;
use regex::Regex;
use std::sync::OnceLock;

static ROUTE_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_route_regex() -> &'static Regex {
    ROUTE_REGEX.get_or_init(|| {
        Regex::new(r"(?i)^route(6)?:\s*([^\s#]*)").expect("Invalid Regex")
    })
}

/// Inverse query text for all route objects originated by `as_number`.
pub fn routes_query(as_number: u32) -> String {
    format!(" -i origin AS{as_number}")
}

/// Collect networks from the `route:` (and optionally `route6:`) attributes.
///
/// Values that are not valid networks, including ones with host bits set,
/// are skipped with a warning naming the token.
pub fn parse_routes(reply: &str, include_ipv6: bool) -> Vec<Network> {
    let mut routes = Vec::new();

    for line in reply.lines() {
        let Some(caps) = get_route_regex().captures(line) else {
            continue;
        };
        if caps.get(1).is_some() && !include_ipv6 {
            continue;
        }
        let token = caps.get(2).map_or("", |m| m.as_str());
        match token.parse::<Network>() {
            Ok(net) => routes.push(net),
            Err(e) => log::warn!("{e}"),
        }
    }

    routes
}

/// Query `host` for the routes originated by `as_number`.
pub fn fetch_routes(
    source: &dyn WhoisSource,
    host: &str,
    as_number: u32,
    include_ipv6: bool,
) -> Result<Vec<Network>> {
    let reply = source.query(host, &routes_query(as_number))?;
    let routes = parse_routes(&reply, include_ipv6);
    log::info!("Got {} routes for AS{as_number}", routes.len());
    Ok(routes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const REPLY: &str = "\
route:          8.8.4.0/24
descr:          Google
origin:         AS15169
mnt-by:         MAINT-AS15169
source:         RADB

ROUTE:          8.8.8.0/24 # comment
origin:         AS15169

route:          8.8.8.1/24
origin:         AS15169

route6:         2001:4860::/32
origin:         AS15169
";

    fn nets(cidrs: &[&str]) -> Vec<Network> {
        cidrs.iter().map(|s| s.parse().unwrap()).collect()
    }

    #[test]
    fn test_parse_routes_ipv4_only() {
        assert_eq!(
            parse_routes(REPLY, false),
            nets(&["8.8.4.0/24", "8.8.8.0/24"])
        );
    }

    #[test]
    fn test_parse_routes_with_ipv6() {
        assert_eq!(
            parse_routes(REPLY, true),
            nets(&["8.8.4.0/24", "8.8.8.0/24", "2001:4860::/32"])
        );
    }

    #[test]
    fn test_parse_routes_ignores_other_attributes() {
        let reply = "routes-of: nothing\norigin: AS1\nroute-set: RS-FOO\n";
        assert!(parse_routes(reply, true).is_empty());
    }

    #[test]
    fn test_routes_query() {
        assert_eq!(routes_query(15169), " -i origin AS15169");
    }
}
