//! Launch-at-login registration.
//!
//! Each platform stores the registration differently:
//! - Linux: XDG desktop entry in `~/.config/autostart/<name>.desktop`
//! - macOS: LaunchAgent plist in `~/Library/LaunchAgents/<name>.plist`
//! - Windows: value under `HKCU\Software\Microsoft\Windows\CurrentVersion\Run`
//!
//! All of them are reached through the [`Autostart`] trait so the tray can
//! be tested with a fake.

mod entry_file;

#[cfg(target_os = "linux")]
#[path = "platform_linux.rs"]
mod platform;

#[cfg(target_os = "macos")]
#[path = "platform_macos.rs"]
mod platform;

#[cfg(target_os = "windows")]
#[path = "platform_windows.rs"]
mod platform;

#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
#[path = "platform_other.rs"]
mod platform;

pub use entry_file::EntryFile;

/// Errors produced while changing the registration.
#[derive(Debug, thiserror::Error)]
pub enum AutostartError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("registration command failed: {0}")]
    Command(String),

    #[error("autostart unavailable: {0}")]
    Unavailable(&'static str),
}

/// The application to register.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutostartApp {
    /// Identifier used for the file or registry value name.
    pub name: String,
    /// Human readable name.
    pub display_name: String,
    /// Executable followed by its arguments.
    pub exec: Vec<String>,
}

impl AutostartApp {
    /// Registration for the running executable, without arguments.
    pub fn current_exe(name: &str) -> Self {
        let exe = std::env::current_exe()
            .map(|p| p.display().to_string())
            .or_else(|_| std::env::args().next().ok_or(()))
            .unwrap_or_else(|_| name.to_string());
        Self {
            name: name.to_string(),
            display_name: name.to_string(),
            exec: vec![exe],
        }
    }
}

/// Query and change the launch-at-login registration.
///
/// `enable` on an enabled app and `disable` on a disabled one succeed
/// without changing anything observable.
pub trait Autostart: Send {
    fn is_enabled(&self) -> bool;
    fn enable(&self) -> Result<(), AutostartError>;
    fn disable(&self) -> Result<(), AutostartError>;
}

/// Backend used when no registration location exists.
#[cfg_attr(target_os = "windows", allow(dead_code))]
struct Unavailable {
    reason: &'static str,
}

impl Autostart for Unavailable {
    fn is_enabled(&self) -> bool {
        false
    }

    fn enable(&self) -> Result<(), AutostartError> {
        Err(AutostartError::Unavailable(self.reason))
    }

    fn disable(&self) -> Result<(), AutostartError> {
        Err(AutostartError::Unavailable(self.reason))
    }
}

/// Returns the registration backend for the current platform.
pub fn for_app(app: AutostartApp) -> Box<dyn Autostart> {
    platform::backend(app)
}
