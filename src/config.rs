//! Runtime configuration: command line arguments and environment defaults.

use crate::output::Lang;
use crate::processing::DuplicatePolicy;
use clap::Parser;
use std::env;

/// Whois client used when `ASN_SUMMARY_WHOIS_BIN` is not set.
pub const DEFAULT_WHOIS_COMMAND: &str = "whois";
/// Server answering IP/network -> AS queries.
pub const DEFAULT_ASN_HOST: &str = "whois.cymru.com";
/// Routing registry answering origin -> route queries.
pub const DEFAULT_ROUTE_HOST: &str = "whois.radb.net";
/// Above this many routes the user is told aggregation may take a while.
pub const PLEASE_WAIT_ROUTES: usize = 50;
/// Largest whois reply accepted, in bytes.
pub const MAX_REPLY_BYTES: usize = 16 * 1024 * 1024;

pub const ENV_WHOIS_BIN: &str = "ASN_SUMMARY_WHOIS_BIN";
pub const ENV_ASN_HOST: &str = "ASN_SUMMARY_ASN_HOST";
pub const ENV_ROUTE_HOST: &str = "ASN_SUMMARY_ROUTE_HOST";
pub const ENV_LANG: &str = "ASN_SUMMARY_LANG";

/// Command line arguments.
#[derive(Parser, Debug, Default)]
#[command(name = "asn-route-summary", version)]
#[command(about = "Retrieve AS information and routes.", long_about = None)]
pub struct Args {
    /// IP, network, hostname or AS number for analysis.
    pub query: Option<String>,

    /// Largest address count difference allowed when merging two networks.
    #[arg(long, default_value_t = 0)]
    pub tolerance: u128,

    /// Retrieve and merge routes for the found AS.
    #[arg(short = 'r')]
    pub retrieve: bool,

    /// Print networks as address/dotted-netmask.
    #[arg(short = 'm')]
    pub mask: bool,

    /// Language for output.
    #[arg(long, value_enum)]
    pub lang: Option<Lang>,

    /// Do not merge networks.
    #[arg(long)]
    pub no_merge: bool,

    /// Keep only one copy of duplicate networks.
    #[arg(long)]
    pub dedup: bool,

    /// Also collect route6 objects.
    #[arg(long)]
    pub ipv6: bool,

    /// Print the result as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Settings for one lookup run.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub whois_command: String,
    pub asn_host: String,
    pub route_host: String,
    pub lang: Lang,
    pub tolerance: u128,
    pub merge: bool,
    pub retrieve: bool,
    pub mask: bool,
    pub duplicate_policy: DuplicatePolicy,
    pub include_ipv6: bool,
    pub json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            whois_command: DEFAULT_WHOIS_COMMAND.to_string(),
            asn_host: DEFAULT_ASN_HOST.to_string(),
            route_host: DEFAULT_ROUTE_HOST.to_string(),
            lang: Lang::En,
            tolerance: 0,
            merge: true,
            retrieve: false,
            mask: false,
            duplicate_policy: DuplicatePolicy::Retain,
            include_ipv6: false,
            json: false,
        }
    }
}

impl Config {
    /// Build a config from parsed arguments, falling back to the process environment.
    pub fn from_args(args: &Args) -> Config {
        Self::from_args_with_env(args, |key| env::var(key).ok())
    }

    /// Same as [`Config::from_args`] with an explicit environment lookup.
    pub fn from_args_with_env<F>(args: &Args, env_var: F) -> Config
    where
        F: Fn(&str) -> Option<String>,
    {
        let env_or = |key: &str, default: &str| {
            env_var(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let config = Config {
            whois_command: env_or(ENV_WHOIS_BIN, DEFAULT_WHOIS_COMMAND),
            asn_host: env_or(ENV_ASN_HOST, DEFAULT_ASN_HOST),
            route_host: env_or(ENV_ROUTE_HOST, DEFAULT_ROUTE_HOST),
            lang: args.lang.unwrap_or_else(|| detect_lang(&env_var)),
            tolerance: args.tolerance,
            merge: !args.no_merge,
            retrieve: args.retrieve,
            mask: args.mask,
            duplicate_policy: if args.dedup {
                DuplicatePolicy::Collapse
            } else {
                DuplicatePolicy::Retain
            },
            include_ipv6: args.ipv6,
            json: args.json,
        };
        log::debug!("{config:?}");
        config
    }
}

/// Pick the output language from `ASN_SUMMARY_LANG` or the locale variables.
pub fn detect_lang<F>(env_var: &F) -> Lang
where
    F: Fn(&str) -> Option<String>,
{
    [ENV_LANG, "LC_ALL", "LC_MESSAGES", "LANG"]
        .iter()
        .filter_map(|key| env_var(*key))
        .find(|v| !v.trim().is_empty())
        .map(|v| lang_from_locale(&v))
        .unwrap_or(Lang::En)
}

/// Russian for `ru`, `be` and `uk` locales, English otherwise.
pub fn lang_from_locale(locale: &str) -> Lang {
    let code = locale
        .split(['_', '.', '-', '@'])
        .next()
        .unwrap_or("")
        .to_ascii_lowercase();
    match code.as_str() {
        "ru" | "be" | "uk" => Lang::Ru,
        _ => Lang::En,
    }
}
