//! Log sink setup.
//!
//! `-log=stdout` logs to the console; `-log=file` appends to `-log_path`.
//! The numeric `-log_level` (0 emergency .. 7 debug) picks the default
//! filter, and `RUST_LOG` overrides it.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use npc_launcher_config::{Configuration, LogLevel, LogMode};
use tracing_subscriber::EnvFilter;

/// Log files above this size are moved aside at startup.
const MAX_LOG_BYTES: u64 = 16 * 1024 * 1024;

/// Maps the syslog-style level to a tracing filter directive.
fn level_directive(level: LogLevel) -> &'static str {
    match level.get() {
        0..=3 => "error",
        4 => "warn",
        5 | 6 => "info",
        _ => "debug",
    }
}

fn rotated_path(path: &Path) -> PathBuf {
    let mut rotated = path.as_os_str().to_owned();
    rotated.push(".1");
    PathBuf::from(rotated)
}

/// Renames `path` to `<path>.1` when it has grown past `max_bytes`.
fn rotate_if_large(path: &Path, max_bytes: u64) -> std::io::Result<bool> {
    match std::fs::metadata(path) {
        Ok(meta) if meta.len() > max_bytes => {
            std::fs::rename(path, rotated_path(path))?;
            Ok(true)
        }
        Ok(_) => Ok(false),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

/// Installs the global subscriber.
pub fn init(config: &Configuration) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_directive(config.log_level)));

    match config.log_mode {
        LogMode::Stdout => {
            tracing_subscriber::fmt().with_env_filter(filter).init();
        }
        LogMode::File => {
            let path = &config.log_path;
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            let rotated = rotate_if_large(path, MAX_LOG_BYTES)?;
            let file = OpenOptions::new().create(true).append(true).open(path)?;

            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();

            if rotated {
                tracing::info!(previous = %rotated_path(path).display(), "log file rotated");
            }
        }
    }

    Ok(())
}
