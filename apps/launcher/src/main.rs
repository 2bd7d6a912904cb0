//! npc launcher entry point.

#![cfg_attr(all(windows, not(feature = "headless")), windows_subsystem = "windows")]

mod app;
mod logging;

#[cfg(all(not(feature = "headless"), any(windows, target_os = "macos", feature = "gui")))]
#[path = "backend_gui.rs"]
mod backend;

#[cfg(not(all(not(feature = "headless"), any(windows, target_os = "macos", feature = "gui"))))]
#[path = "backend_headless.rs"]
mod backend;

#[cfg(all(not(feature = "headless"), any(windows, target_os = "macos", feature = "gui")))]
mod icon;

use npc_launcher_config::{ConfigError, Configuration, Flags};

/// Whether this build shows a native tray icon.
const NATIVE_TRAY: bool = cfg!(all(
    not(feature = "headless"),
    any(windows, target_os = "macos", feature = "gui")
));

fn main() -> anyhow::Result<()> {
    let flags = match Flags::from_args(std::env::args()) {
        Ok(flags) => flags,
        // Prints usage (or --help / --version output) and exits.
        Err(ConfigError::Flags(e)) => e.exit(),
        Err(e) => return Err(e.into()),
    };

    let mut config = Configuration::default();
    flags.apply(&mut config);

    logging::init(&config)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        log_level = %config.log_level,
        native_tray = NATIVE_TRAY,
        "starting npc launcher"
    );

    app::run(&flags, config)?;

    tracing::info!("launcher shut down cleanly");
    Ok(())
}
