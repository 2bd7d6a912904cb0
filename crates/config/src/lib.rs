//! Configuration for the npc launcher.
//!
//! Three sources feed the same [`Configuration`]:
//! - command-line flags ([`Flags`]), Go-style (`-server=host:port`)
//! - the on-disk `npc.toml` file ([`ConfigFile`]), `key='value'` lines
//! - lines submitted through the tray's edit dialog (parsed as [`Flags`])
//!
//! The tray thread and the reconnect supervisor share the configuration
//! through a [`SharedConfig`] cell.

mod config;
mod error;
mod file;
mod flags;
mod shared;

pub use config::{ConnType, Configuration, LogLevel, LogMode};
pub use error::ConfigError;
pub use file::{CONFIG_TEMPLATE, ConfigFile, DEFAULT_CONFIG_FILE, FileValues, default_config_path};
pub use flags::{Flags, normalize_args};
pub use shared::SharedConfig;
