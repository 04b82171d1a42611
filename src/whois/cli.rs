//! Whois client execution.
//!
//! Spawns the system `whois` binary and turns its exit status and output
//! into a reply string or an [`Error`].

use crate::error::{Error, Result};
use colored::Colorize;
use regex::Regex;
use std::io;
use std::process::{Command, Output};
use std::sync::OnceLock;

/// Splits a configured command line into words; quoted words may hold spaces.
static WORD_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_word_regex() -> &'static Regex {
    WORD_REGEX.get_or_init(|| {
        Regex::new(r#"'([^']*)'|"([^"]*)"|(\S+)"#).expect("Invalid Regex")
    })
}

/// Run `cmd` followed by `extra_args` and return its stdout.
///
/// `cmd` comes from configuration (`whois`, `whois -p 43`, `'/opt/my whois'`)
/// and is split into words. `extra_args` are passed through untouched, so a
/// query such as `" -v 8.8.8.8"` reaches the server as one argument.
///
/// # Errors
/// * [`Error::WhoisNotFound`] when the program cannot be found
/// * [`Error::Whois`] on a non-zero exit, an empty reply or a reply over `max_stdout` bytes
/// * [`Error::Config`] when `cmd` holds no program name
pub fn run(cmd: &str, extra_args: &[&str], max_stdout: usize) -> Result<String> {
    let words = command_words(cmd);
    let (program, base_args) = words
        .split_first()
        .ok_or_else(|| Error::Config(format!("empty whois command: '{cmd}'")))?;
    log::debug!(
        "spawn {program} {base_args:?} {extra_args:?}",
        program = program.on_blue()
    );

    let output = Command::new(program)
        .args(base_args)
        .args(extra_args)
        .output()
        .map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => Error::WhoisNotFound(program.clone()),
            _ => {
                log::error!("spawning {program} failed: {e}");
                Error::Io(e)
            }
        })?;

    reply_text(output, max_stdout)
}

/// Accept a finished process only if it exited cleanly with a bounded, non-empty reply.
fn reply_text(output: Output, max_stdout: usize) -> Result<String> {
    if !output.status.success() || output.stdout.is_empty() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        log::warn!(
            "whois {failed} status={status} stderr={stderr}",
            failed = "failed".on_red(),
            status = output.status,
            stderr = stderr.red()
        );
        return Err(Error::Whois(stderr));
    }

    let len = output.stdout.len();
    log::trace!("whois reply: {len} bytes");
    if len > max_stdout {
        return Err(Error::Whois(format!(
            "reply of {len} bytes exceeds the {max_stdout} byte limit"
        )));
    }

    // Registry objects may carry latin-1 org names.
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Words of a command line with surrounding quotes removed.
fn command_words(input: &str) -> Vec<String> {
    get_word_regex()
        .captures_iter(input)
        .filter_map(|caps| caps.get(1).or(caps.get(2)).or(caps.get(3)))
        .map(|m| m.as_str().to_string())
        .collect()
}
