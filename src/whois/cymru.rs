//! AS information lookups (Team Cymru style `|`-separated replies).

use super::WhoisSource;
use crate::error::Result;
use crate::models::AsInfo;

/// Minimum number of `|` separated fields in a data row.
const MIN_FIELDS: usize = 7;

/// Verbose query text for an IP address or network.
pub fn as_info_query(target: &str) -> String {
    format!(" -v {target}")
}

/// Parse an AS-info reply into records.
///
/// Rows look like
/// `15169 | 8.8.8.8 | 8.8.8.0/24 | US | arin | 2023-12-28 | GOOGLE, US`.
/// The header row and lines with too few fields are skipped.
pub fn parse_as_info(reply: &str) -> Vec<AsInfo> {
    reply
        .lines()
        .filter(|line| !(line.starts_with("AS") && line.contains("BGP Prefix")))
        .filter_map(|line| {
            let parts: Vec<&str> = line.split('|').map(str::trim).collect();
            if parts.len() < MIN_FIELDS {
                log::trace!("skip as-info line: {line}");
                return None;
            }
            Some(AsInfo {
                as_number: parts[0].to_string(),
                ip: parts[1].to_string(),
                bgp_prefix: parts[2].to_string(),
                country: parts[3].to_string(),
                registry: parts[4].to_string(),
                allocated: parts[5].to_string(),
                as_name: parts[6].to_string(),
            })
        })
        .collect()
}

/// Query `host` for the AS records covering `target`.
pub fn fetch_as_info(source: &dyn WhoisSource, host: &str, target: &str) -> Result<Vec<AsInfo>> {
    let reply = source.query(host, &as_info_query(target))?;
    let records = parse_as_info(&reply);
    log::info!("Got {} AS records for {target}", records.len());
    Ok(records)
}
