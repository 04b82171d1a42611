//! Pluggable whois backends.

use super::cli;
use crate::config;
use crate::error::Result;

/// Something that answers a whois query against a given server.
///
/// The shell client is the production backend; tests plug in canned replies.
pub trait WhoisSource: Send + Sync {
    /// Send `query` to `host` and return the raw reply text.
    fn query(&self, host: &str, query: &str) -> Result<String>;
}

/// Runs the system whois client: `<command> -h <host> <query>`.
#[derive(Debug, Clone)]
pub struct ShellWhois {
    /// Base command line, split on spaces (quotes preserved).
    pub command: String,
    /// Largest accepted reply in bytes.
    pub max_reply_bytes: usize,
}

impl ShellWhois {
    pub fn new(command: &str) -> Self {
        ShellWhois {
            command: command.to_string(),
            max_reply_bytes: config::MAX_REPLY_BYTES,
        }
    }
}

impl Default for ShellWhois {
    fn default() -> Self {
        Self::new(config::DEFAULT_WHOIS_COMMAND)
    }
}

impl WhoisSource for ShellWhois {
    fn query(&self, host: &str, query: &str) -> Result<String> {
        log::info!("whois -h {host} '{query}'");
        cli::run(&self.command, &["-h", host, query], self.max_reply_bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_shell_whois_defaults() {
        let whois = ShellWhois::default();
        assert_eq!(whois.command, "whois");
        assert_eq!(whois.max_reply_bytes, config::MAX_REPLY_BYTES);
    }

    #[test]
    fn test_shell_whois_missing_binary() {
        let whois = ShellWhois::new("definitely-not-a-whois-client");
        let err = whois.query("whois.radb.net", " -i origin AS64496").unwrap_err();
        assert!(matches!(err, Error::WhoisNotFound(_)));
    }
}
