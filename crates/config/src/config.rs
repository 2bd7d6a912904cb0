//! The launcher's configuration record.

use std::fmt;
use std::path::PathBuf;

use clap::ValueEnum;

/// Transport used between the tunnel client and the server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ConnType {
    #[default]
    Tcp,
    Kcp,
}

impl ConnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnType::Tcp => "tcp",
            ConnType::Kcp => "kcp",
        }
    }
}

impl fmt::Display for ConnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where log output goes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogMode {
    #[default]
    Stdout,
    File,
}

/// Syslog-style severity threshold, 0 (emergency) through 7 (debug).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LogLevel(u8);

impl LogLevel {
    pub const MAX: u8 = 7;

    /// Returns `None` when `level` is above [`LogLevel::MAX`].
    pub fn new(level: u8) -> Option<Self> {
        (level <= Self::MAX).then_some(Self(level))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for LogLevel {
    fn default() -> Self {
        Self(Self::MAX)
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Launcher configuration.
///
/// `server_addr` and `verify_key` may be empty; the tunnel client decides
/// how to treat missing credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    /// Tunnel server address (`host:port`).
    pub server_addr: String,
    /// Verification key presented to the server.
    pub verify_key: String,
    /// Transport to the server.
    pub conn_type: ConnType,
    /// Proxy the tunnel client dials through (empty = direct).
    pub proxy_url: String,
    /// Console or file logging.
    pub log_mode: LogMode,
    pub log_level: LogLevel,
    /// Log file used when `log_mode` is [`LogMode::File`].
    pub log_path: PathBuf,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            server_addr: String::new(),
            verify_key: String::new(),
            conn_type: ConnType::default(),
            proxy_url: String::new(),
            log_mode: LogMode::default(),
            log_level: LogLevel::default(),
            log_path: PathBuf::from("npc.log"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_configuration() {
        let config = Configuration::default();
        assert!(config.server_addr.is_empty());
        assert!(config.verify_key.is_empty());
        assert_eq!(config.conn_type, ConnType::Tcp);
        assert_eq!(config.log_mode, LogMode::Stdout);
        assert_eq!(config.log_level.get(), 7);
        assert_eq!(config.log_path, PathBuf::from("npc.log"));
    }

    #[test]
    fn log_level_bounds() {
        assert_eq!(LogLevel::new(0).map(LogLevel::get), Some(0));
        assert_eq!(LogLevel::new(7).map(LogLevel::get), Some(7));
        assert!(LogLevel::new(8).is_none());
    }

    #[test]
    fn conn_type_names() {
        assert_eq!(ConnType::Tcp.to_string(), "tcp");
        assert_eq!(ConnType::Kcp.to_string(), "kcp");
    }
}
