use asn_route_summary::config::{Args, Config};
use asn_route_summary::output::{describe_error, print_report, render_json, Msg};
use asn_route_summary::system_lookup;
use clap::{CommandFactory, Parser};
use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config as LogConfig, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::error::Error;
use std::path::Path;

const LOG_CONFIG_FILE: &str = "log4rs.yml";

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    init_logging()?;
    dotenv::dotenv().ok();
    log::info!("#Start main()");

    let args = Args::parse();
    let config = Config::from_args(&args);
    let lang = config.lang;

    let query = match args.query.as_deref().map(str::trim) {
        None => {
            Args::command().print_help()?;
            println!("{}", lang.text(Msg::Usage));
            return Ok(());
        }
        Some(q) if matches!(q.to_lowercase().as_str(), "help" | "-h" | "--help") => {
            println!("{}", lang.text(Msg::Usage));
            return Ok(());
        }
        Some(q) => q.to_string(),
    };

    let lookup = system_lookup(config.clone());

    let result = tokio::select! {
        result = lookup.run(&query) => result,
        _ = tokio::signal::ctrl_c() => {
            println!("\n{}", lang.text(Msg::Interrupted));
            // Do not wait for whois children still running on the blocking pool.
            std::process::exit(130);
        }
    };

    match result {
        Ok(report) if config.json => println!("{}", render_json(&report)?),
        Ok(report) => print_report(&report, &config),
        Err(e) => {
            log::debug!("lookup failed: {e:?}");
            eprintln!("{}", describe_error(&e, lang));
            std::process::exit(1);
        }
    }

    Ok(())
}

/// Use log4rs.yml when present, otherwise log warnings to stderr.
fn init_logging() -> Result<(), Box<dyn Error>> {
    if Path::new(LOG_CONFIG_FILE).exists() {
        log4rs::init_file(LOG_CONFIG_FILE, Default::default())?;
        return Ok(());
    }

    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("{l} {M} - {m}{n}")))
        .build();
    let config = LogConfig::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(LevelFilter::Warn))?;
    log4rs::init_config(config)?;
    Ok(())
}
