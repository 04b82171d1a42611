//! Terminal output utilities.
//!
//! Renders lookup reports as the plain, line-oriented text printed to stdout.

use super::messages::{Lang, Msg};
use crate::config::{Config, PLEASE_WAIT_ROUTES};
use crate::error::Error;
use crate::lookup::{Notice, Report, RouteSet};
use crate::models::{AsInfo, Network};
use colored::Colorize;
use itertools::Itertools;

/// Width of the label column in the AS information block.
const LABEL_WIDTH: usize = 15;

fn separator() -> String {
    "-".repeat(40)
}

/// Format a value as a left-aligned, padded label.
///
/// # Arguments
/// * `value` - The value to format
/// * `width` - The minimum width of the field
pub fn format_field<T: ToString>(value: T, width: usize) -> String {
    let value_str = value.to_string();
    format!("{value_str:<width$}")
}

/// A network as `address/prefix`, or `address/dotted-mask` when `mask` is set.
///
/// IPv6 networks have no dotted mask and always use the prefix form.
pub fn format_network(net: &Network, mask: bool) -> String {
    match net.netmask() {
        Some(netmask) if mask => format!("{}/{}", net.addr(), netmask),
        _ => net.to_string(),
    }
}

/// The AS information block for one or more records.
pub fn render_as_info(records: &[AsInfo], lang: Lang) -> String {
    let mut out = format!("{}\n{}\n", separator(), lang.text(Msg::AsInfo).bold());
    for info in records {
        for (msg, value) in [
            (Msg::As, &info.as_number),
            (Msg::Ip, &info.ip),
            (Msg::BgpPrefix, &info.bgp_prefix),
            (Msg::Country, &info.country),
            (Msg::Registry, &info.registry),
            (Msg::Allocated, &info.allocated),
            (Msg::AsName, &info.as_name),
        ] {
            out.push_str(&format!(
                "{} {}\n",
                format_field(lang.text(msg), LABEL_WIDTH),
                value
            ));
        }
        out.push_str(&separator());
        out.push('\n');
    }
    out
}

/// Localized "(Please wait...)" line.
pub fn please_wait(lang: Lang) -> String {
    lang.text(Msg::PleaseWait).italic().to_string()
}

/// One line per route set whose registry query failed.
fn render_route_errors(route_sets: &[RouteSet], lang: Lang) -> String {
    route_sets
        .iter()
        .filter_map(|set| {
            set.error.as_ref().map(|message| {
                format!(
                    "{}: AS{}: {message}\n",
                    lang.text(Msg::ErrorWhois),
                    set.as_number
                )
            })
        })
        .collect()
}

/// Render a whole report the way the terminal shows it.
pub fn render_report(report: &Report, config: &Config) -> String {
    let lang = config.lang;

    match &report.notice {
        Some(Notice::NoRoutes { as_number }) => {
            let mut out = render_route_errors(&report.route_sets, lang);
            out.push_str(&format!("{} AS{as_number}.\n", lang.text(Msg::NoRoutes)));
            return out;
        }
        Some(Notice::NoInfo { target }) => {
            return format!("{} {target}.\n", lang.text(Msg::NoInfo));
        }
        None => {}
    }

    let mut out = render_as_info(&report.as_info, lang);
    if report.route_sets.is_empty() {
        return out;
    }
    out.push_str(&render_route_errors(&report.route_sets, lang));

    let heading = if report.merged {
        Msg::MergedNetworks
    } else {
        Msg::Networks
    };
    out.push_str(&format!("{}\n", lang.text(heading).bold()));

    // Shown for origin lookups that pulled in a large route set.
    if config.retrieve
        && report
            .route_sets
            .iter()
            .any(|set| set.route_count > PLEASE_WAIT_ROUTES)
    {
        out.push_str(&please_wait(lang));
        out.push('\n');
    }

    let lines = report
        .route_sets
        .iter()
        .flat_map(|set| set.networks.iter())
        .map(|net| format_network(net, config.mask))
        .join("\n");
    if !lines.is_empty() {
        out.push_str(&lines);
        out.push('\n');
    }
    out
}

/// Localized one-line diagnostic for a failed lookup.
pub fn describe_error(err: &Error, lang: Lang) -> String {
    match err {
        Error::InvalidNetwork(token) => {
            format!("{}: {token}", lang.text(Msg::InvalidNetworkFormat))
        }
        Error::Whois(stderr) => format!("{}: {stderr}", lang.text(Msg::ErrorWhois)),
        Error::WhoisNotFound(_) => lang.text(Msg::WhoisNotFound).to_string(),
        Error::Resolve(host) => format!("{} {host}", lang.text(Msg::DomainIpError)),
        other => other.to_string(),
    }
}

/// Print a report to stdout.
pub fn print_report(report: &Report, config: &Config) {
    print!("{}", render_report(report, config));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn net(s: &str) -> Network {
        s.parse().unwrap()
    }

    fn google() -> AsInfo {
        AsInfo {
            as_number: "15169".to_string(),
            ip: "8.8.8.8".to_string(),
            bgp_prefix: "8.8.8.0/24".to_string(),
            country: "US".to_string(),
            registry: "arin".to_string(),
            allocated: "2023-12-28".to_string(),
            as_name: "GOOGLE, US".to_string(),
        }
    }

    #[test]
    fn test_format_field_short() {
        assert_eq!(format_field("AS:", 6), "AS:   ");
    }

    #[test]
    fn test_format_field_long() {
        assert_eq!(format_field("long_value", 5), "long_value");
    }

    #[test]
    fn test_format_network_mask() {
        assert_eq!(format_network(&net("8.8.8.0/24"), false), "8.8.8.0/24");
        assert_eq!(format_network(&net("8.8.8.0/24"), true), "8.8.8.0/255.255.255.0");
        assert_eq!(format_network(&net("10.0.0.0/13"), true), "10.0.0.0/255.248.0.0");
        assert_eq!(format_network(&net("2001:db8::/32"), true), "2001:db8::/32");
    }

    #[test]
    fn test_render_as_info_labels() {
        let text = render_as_info(&[google()], Lang::En);
        assert!(text.contains("AS Information:"));
        assert!(text.contains("AS:             15169\n"));
        assert!(text.contains("AS Name:        GOOGLE, US\n"));
        assert_eq!(text.matches(&separator()).count(), 2);

        let text = render_as_info(&[google()], Lang::Ru);
        assert!(text.contains("Страна:         US\n"));
    }

    #[test]
    fn test_render_report_networks() {
        let report = Report {
            query: "15169".to_string(),
            merged: true,
            as_info: vec![google()],
            route_sets: vec![RouteSet {
                as_number: 15169,
                route_count: 3,
                networks: vec![net("8.8.4.0/24"), net("8.8.8.0/24")],
                error: None,
            }],
            notice: None,
        };
        let config = Config {
            mask: true,
            ..Default::default()
        };
        let text = render_report(&report, &config);
        assert!(text.contains("Merged Networks:"));
        assert!(text.ends_with("8.8.4.0/255.255.255.0\n8.8.8.0/255.255.255.0\n"));

        let report = Report {
            merged: false,
            ..report
        };
        let text = render_report(&report, &Config::default());
        assert!(text.contains("Networks:"));
        assert!(!text.contains("Merged"));
        assert!(text.ends_with("8.8.4.0/24\n8.8.8.0/24\n"));
    }

    #[test]
    fn test_describe_error() {
        let err = Error::InvalidNetwork("10.0.0.1/24 has host bits set".to_string());
        assert_eq!(
            describe_error(&err, Lang::En),
            "Invalid network format: 10.0.0.1/24 has host bits set"
        );
        let err = Error::Resolve("nowhere.invalid".to_string());
        assert_eq!(
            describe_error(&err, Lang::Ru),
            "Ошибка: Не удалось найти IP для домена nowhere.invalid"
        );
        let err = Error::WhoisNotFound("whois".to_string());
        assert_eq!(
            describe_error(&err, Lang::En),
            "Whois command not found. Ensure it is installed."
        );
    }

    #[test]
    fn test_render_report_notices() {
        let report = Report {
            notice: Some(Notice::NoRoutes { as_number: 64496 }),
            ..Default::default()
        };
        assert_eq!(
            render_report(&report, &Config::default()),
            "No routes found for AS64496.\n"
        );

        let report = Report {
            notice: Some(Notice::NoInfo {
                target: "192.0.2.1".to_string(),
            }),
            ..Default::default()
        };
        let config = Config {
            lang: Lang::Ru,
            ..Default::default()
        };
        assert_eq!(
            render_report(&report, &config),
            "Нет информации о 192.0.2.1.\n"
        );
    }

    fn large_route_set() -> RouteSet {
        RouteSet {
            as_number: 15169,
            route_count: PLEASE_WAIT_ROUTES + 1,
            networks: vec![net("8.8.4.0/23")],
            error: None,
        }
    }

    #[test]
    fn test_please_wait_follows_heading_for_retrieved_routes() {
        let report = Report {
            query: "8.8.8.8".to_string(),
            merged: true,
            as_info: vec![google()],
            route_sets: vec![large_route_set()],
            notice: None,
        };
        let config = Config {
            retrieve: true,
            ..Default::default()
        };
        let text = render_report(&report, &config);
        let heading = text.find("Merged Networks:").unwrap();
        let wait = text.find("(Please wait...)").unwrap();
        let first_net = text.find("8.8.4.0/23").unwrap();
        assert!(text.find("AS Information:").unwrap() < heading);
        assert!(heading < wait && wait < first_net);
    }

    #[test]
    fn test_no_please_wait_for_as_number_queries() {
        let report = Report {
            query: "AS15169".to_string(),
            merged: true,
            as_info: vec![google()],
            route_sets: vec![large_route_set()],
            notice: None,
        };
        let text = render_report(&report, &Config::default());
        assert!(!text.contains("(Please wait...)"));
    }

    #[test]
    fn test_route_errors_are_reported_per_origin() {
        let report = Report {
            query: "8.8.8.8".to_string(),
            merged: true,
            as_info: vec![google()],
            route_sets: vec![
                RouteSet {
                    as_number: 15169,
                    route_count: 1,
                    networks: vec![net("8.8.8.0/24")],
                    error: None,
                },
                RouteSet::failed(64499, "connection refused".to_string()),
            ],
            notice: None,
        };
        let text = render_report(&report, &Config::default());
        assert!(text.contains("Error executing whois: AS64499: connection refused\n"));
        assert!(text.ends_with("8.8.8.0/24\n"));

        let report = Report {
            notice: Some(Notice::NoRoutes { as_number: 64499 }),
            as_info: Vec::new(),
            route_sets: vec![RouteSet::failed(64499, "timeout".to_string())],
            ..report
        };
        let config = Config {
            lang: Lang::Ru,
            ..Default::default()
        };
        assert_eq!(
            render_report(&report, &config),
            "Ошибка выполнения whois: AS64499: timeout\nНет маршрутов для AS64499.\n"
        );
    }
}
