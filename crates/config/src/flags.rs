//! Command-line flags.
//!
//! The launcher keeps the single-dash long flag syntax of the npc client
//! (`-server=host:port -vkey=key`). Arguments are rewritten to clap's
//! double-dash form by [`normalize_args`] before parsing, so both spellings
//! are accepted.

use std::path::PathBuf;

use clap::Parser;

use crate::config::{ConnType, Configuration, LogLevel, LogMode};
use crate::error::ConfigError;

/// npc launcher - keeps an npc tunnel client connected from the system tray.
#[derive(Parser, Debug, Clone, Default, PartialEq, Eq)]
#[command(name = "npc-launcher", version, about, long_about = None)]
pub struct Flags {
    /// Server addr (ip:port)
    #[arg(long, allow_hyphen_values = true)]
    pub server: Option<String>,

    /// Authentication key
    #[arg(long, allow_hyphen_values = true)]
    pub vkey: Option<String>,

    /// Log output mode
    #[arg(long = "log", value_enum)]
    pub log_mode: Option<LogMode>,

    /// Connection type with the server
    #[arg(long = "type", value_enum)]
    pub conn_type: Option<ConnType>,

    /// Log level 0~7
    #[arg(long = "log_level", value_parser = parse_log_level)]
    pub log_level: Option<LogLevel>,

    /// Log file path (used with `-log=file`)
    #[arg(long = "log_path", allow_hyphen_values = true)]
    pub log_path: Option<PathBuf>,

    /// Proxy URL the tunnel client connects through
    #[arg(long, allow_hyphen_values = true)]
    pub proxy: Option<String>,

    /// Config file path
    #[arg(long, allow_hyphen_values = true)]
    pub config: Option<PathBuf>,

    /// Path of the npc client executable
    #[arg(long = "npc_bin", allow_hyphen_values = true)]
    pub npc_bin: Option<PathBuf>,
}

fn parse_log_level(s: &str) -> Result<LogLevel, String> {
    let level: u8 = s
        .parse()
        .map_err(|_| format!("invalid log level: {s}"))?;
    LogLevel::new(level).ok_or_else(|| format!("log level must be 0~{}, got {level}", LogLevel::MAX))
}

/// Flags that never take a value.
const SWITCHES: &[&str] = &["h", "help", "V", "version"];

/// Rewrites single-dash long flags (`-server=x`) to `--server=x`.
///
/// Only tokens in flag position are rewritten: the token after a
/// value-taking flag without `=` is its value and passes through as is, so
/// `-vkey -abc` sets the key to `-abc`. Short flags (`-h`, `-V`),
/// double-dash flags and plain values are unchanged.
pub fn normalize_args<I, S>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut out = Vec::new();
    let mut value_next = false;

    for arg in args.into_iter().map(Into::into) {
        if std::mem::take(&mut value_next) {
            out.push(arg);
            continue;
        }

        let name = arg
            .strip_prefix("--")
            .or_else(|| arg.strip_prefix('-'))
            .filter(|name| name.starts_with(|c: char| c.is_ascii_alphabetic()));
        let Some(name) = name else {
            out.push(arg);
            continue;
        };

        value_next = !name.contains('=') && !SWITCHES.contains(&name);
        let single_dash_long = !arg.starts_with("--") && name.len() > 1;
        out.push(if single_dash_long { format!("-{arg}") } else { arg });
    }

    out
}

impl Flags {
    /// Parses process arguments (the first item is the binary name).
    pub fn from_args<I, S>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(Self::try_parse_from(normalize_args(args))?)
    }

    /// Parses a single line of whitespace-separated flags, as submitted
    /// through the edit dialog.
    pub fn parse_line(line: &str) -> Result<Self, ConfigError> {
        let args = std::iter::once("npc-launcher").chain(line.split_whitespace());
        Self::from_args(args)
    }

    /// Copies every flag that was given onto `config`; absent flags leave
    /// the existing value untouched.
    pub fn apply(&self, config: &mut Configuration) {
        if let Some(server) = &self.server {
            config.server_addr.clone_from(server);
        }
        if let Some(vkey) = &self.vkey {
            config.verify_key.clone_from(vkey);
        }
        if let Some(mode) = self.log_mode {
            config.log_mode = mode;
        }
        if let Some(conn_type) = self.conn_type {
            config.conn_type = conn_type;
        }
        if let Some(level) = self.log_level {
            config.log_level = level;
        }
        if let Some(path) = &self.log_path {
            config.log_path.clone_from(path);
        }
        if let Some(proxy) = &self.proxy {
            config.proxy_url.clone_from(proxy);
        }
    }

    /// First flag in this set that only takes effect at startup, if any.
    pub fn startup_only(&self) -> Option<&'static str> {
        if self.config.is_some() {
            Some("config")
        } else if self.npc_bin.is_some() {
            Some("npc_bin")
        } else {
            None
        }
    }
}
