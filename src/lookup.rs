//! Lookup pipeline: query classification, whois calls and route aggregation.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::{AsInfo, Network};
use crate::processing::summarize;
use crate::whois::{fetch_as_info, fetch_routes, Resolver, WhoisSource};
use futures::future::join_all;
use itertools::Itertools;
use regex::Regex;
use serde::Serialize;
use std::net::IpAddr;
use std::sync::{Arc, OnceLock};
use tokio::task::JoinHandle;

static AS_NUMBER_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_as_number_regex() -> &'static Regex {
    AS_NUMBER_REGEX.get_or_init(|| Regex::new(r"^(?i:as)?([0-9]+)$").expect("Invalid Regex"))
}

/// What the user asked about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// AS number, given as `15169` or `AS15169`.
    As(u32),
    Ip(IpAddr),
    Network(Network),
    Host(String),
}

impl Query {
    /// Classify user input.
    pub fn parse(input: &str) -> Result<Query> {
        let input = input.trim();
        if input.is_empty() {
            return Err(Error::InvalidQuery("empty query".to_string()));
        }
        if let Some(caps) = get_as_number_regex().captures(input) {
            let as_number = caps[1]
                .parse()
                .map_err(|_| Error::InvalidQuery(format!("AS number out of range: {input}")))?;
            return Ok(Query::As(as_number));
        }
        if let Ok(ip) = input.parse::<IpAddr>() {
            return Ok(Query::Ip(ip));
        }
        if input.contains('/') {
            return Ok(Query::Network(input.parse()?));
        }
        if input.chars().any(char::is_whitespace) {
            return Err(Error::InvalidQuery(input.to_string()));
        }
        Ok(Query::Host(input.to_string()))
    }
}

/// Routes announced by one AS, after aggregation and filtering.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct RouteSet {
    pub as_number: u32,
    /// Number of route objects before aggregation.
    pub route_count: usize,
    pub networks: Vec<Network>,
    /// Registry failure for this AS; `networks` is empty when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RouteSet {
    /// Route set for an AS whose registry query failed.
    pub fn failed(as_number: u32, message: String) -> RouteSet {
        RouteSet {
            as_number,
            route_count: 0,
            networks: Vec::new(),
            error: Some(message),
        }
    }
}

/// Soft outcomes that end a lookup early without being errors.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    NoRoutes { as_number: u32 },
    NoInfo { target: String },
}

/// Everything found for one query.
#[derive(Serialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Report {
    pub query: String,
    /// Whether the aggregation step ran.
    pub merged: bool,
    pub as_info: Vec<AsInfo>,
    pub route_sets: Vec<RouteSet>,
    pub notice: Option<Notice>,
}

/// Called with `(as_number, route_count)` before a route set is aggregated.
pub type Progress = Arc<dyn Fn(u32, usize) + Send + Sync>;

/// Runs queries against injected whois and resolver backends.
pub struct Lookup {
    config: Config,
    whois: Arc<dyn WhoisSource>,
    resolver: Arc<dyn Resolver>,
    progress: Option<Progress>,
}

impl Lookup {
    pub fn new(config: Config, whois: Arc<dyn WhoisSource>, resolver: Arc<dyn Resolver>) -> Self {
        Lookup {
            config,
            whois,
            resolver,
            progress: None,
        }
    }

    /// Install a callback that sees each route set's size before aggregation.
    pub fn with_progress(mut self, progress: Progress) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Resolve `input` into AS records and (when asked for) aggregated routes.
    pub async fn run(&self, input: &str) -> Result<Report> {
        let query = Query::parse(input)?;
        log::info!("#Start lookup {query:?}");

        let mut report = Report {
            query: input.trim().to_string(),
            merged: self.config.merge,
            ..Default::default()
        };

        let target = match query {
            Query::As(as_number) => return self.run_as(as_number, report).await,
            Query::Ip(ip) => ip.to_string(),
            Query::Network(net) => net.to_string(),
            Query::Host(host) => self.spawn_resolve(host).await??.to_string(),
        };

        report.as_info = self.spawn_as_info(target.clone()).await??;
        if report.as_info.is_empty() {
            report.notice = Some(Notice::NoInfo { target });
            return Ok(report);
        }

        if self.config.retrieve {
            let as_numbers: Vec<u32> = report
                .as_info
                .iter()
                .filter_map(|info| match info.as_number.parse() {
                    Ok(n) => Some(n),
                    Err(_) => {
                        log::warn!("Skipping non-numeric AS '{}'", info.as_number);
                        None
                    }
                })
                .unique()
                .collect();
            report.route_sets = self.route_sets(&as_numbers).await?;
        }

        Ok(report)
    }

    async fn run_as(&self, as_number: u32, mut report: Report) -> Result<Report> {
        let route_set = self.spawn_route_set(as_number).await??;

        let Some(first) = route_set.networks.first().copied() else {
            report.notice = Some(Notice::NoRoutes { as_number });
            if route_set.error.is_some() {
                report.route_sets.push(route_set);
            }
            return Ok(report);
        };

        report.as_info = self.spawn_as_info(first.to_string()).await??;
        if report.as_info.is_empty() {
            report.notice = Some(Notice::NoInfo {
                target: format!("AS{as_number}"),
            });
        }
        report.route_sets.push(route_set);
        Ok(report)
    }

    /// Fetch and aggregate the routes of every AS concurrently, keeping input order.
    async fn route_sets(&self, as_numbers: &[u32]) -> Result<Vec<RouteSet>> {
        let tasks = as_numbers
            .iter()
            .map(|&as_number| self.spawn_route_set(as_number));

        join_all(tasks)
            .await
            .into_iter()
            .map(|joined| joined?)
            .collect()
    }

    // Whois and name resolution block, so they all run on the blocking pool.

    /// A failed registry query becomes a failed [`RouteSet`] so other origins still report.
    fn spawn_route_set(&self, as_number: u32) -> JoinHandle<Result<RouteSet>> {
        let whois = Arc::clone(&self.whois);
        let config = self.config.clone();
        let progress = self.progress.clone();
        tokio::task::spawn_blocking(move || {
            match build_route_set(whois.as_ref(), &config, as_number, progress.as_ref()) {
                Err(Error::Whois(message)) => {
                    log::warn!("No routes for AS{as_number}: {message}");
                    Ok(RouteSet::failed(as_number, message))
                }
                other => other,
            }
        })
    }

    fn spawn_as_info(&self, target: String) -> JoinHandle<Result<Vec<AsInfo>>> {
        let whois = Arc::clone(&self.whois);
        let host = self.config.asn_host.clone();
        tokio::task::spawn_blocking(move || fetch_as_info(whois.as_ref(), &host, &target))
    }

    fn spawn_resolve(&self, host: String) -> JoinHandle<Result<IpAddr>> {
        let resolver = Arc::clone(&self.resolver);
        tokio::task::spawn_blocking(move || resolver.resolve(&host))
    }
}

/// Fetch routes for one AS, then merge (if enabled) and filter them.
pub fn build_route_set(
    whois: &dyn WhoisSource,
    config: &Config,
    as_number: u32,
    progress: Option<&Progress>,
) -> Result<RouteSet> {
    let routes = fetch_routes(
        whois,
        &config.route_host,
        as_number,
        config.include_ipv6,
    )?;
    if let Some(progress) = progress {
        progress(as_number, routes.len());
    }

    let networks = summarize(
        &routes,
        config.merge,
        config.tolerance,
        config.duplicate_policy,
    );
    log::info!(
        "AS{as_number}: {} routes -> {} networks",
        routes.len(),
        networks.len()
    );

    Ok(RouteSet {
        as_number,
        route_count: routes.len(),
        networks,
        error: None,
    })
}
