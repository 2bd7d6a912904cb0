//! Tray handle and update types.
//!
//! The actual system tray implementation depends on `tray-icon` and `tao`,
//! which require platform-specific system libraries. This module defines
//! the channel-based interface the rest of the launcher uses to talk to the
//! tray, independent of the GUI backend.

use std::sync::mpsc;

use crate::menu::tooltip_text;

/// Configuration for the system tray.
#[derive(Debug, Clone)]
pub struct TrayConfig {
    /// Title shown next to the icon where the platform supports it.
    pub title: String,
    /// Identifier used for the autostart registration.
    pub app_id: String,
}

impl Default for TrayConfig {
    fn default() -> Self {
        Self {
            title: "npc".into(),
            app_id: "npc".into(),
        }
    }
}

/// Updates sent to the tray.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrayUpdate {
    /// New tooltip text.
    Tooltip(String),
    /// Set the "Auto Startup" checkbox.
    AutostartChecked(bool),
    /// Request tray shutdown.
    Shutdown,
}

/// Sending side of the tray channel. Cheap to clone; safe to use from the
/// supervisor task.
#[derive(Debug, Clone)]
pub struct TrayHandle {
    update_tx: mpsc::Sender<TrayUpdate>,
}

/// Receiving side, owned by the tray backend on the main thread.
#[derive(Debug)]
pub struct TrayUpdates {
    update_rx: mpsc::Receiver<TrayUpdate>,
}

/// Creates a connected handle / receiver pair.
pub fn channel() -> (TrayHandle, TrayUpdates) {
    let (update_tx, update_rx) = mpsc::channel();
    (TrayHandle { update_tx }, TrayUpdates { update_rx })
}

impl TrayHandle {
    /// Shows the given server and key in the tooltip.
    pub fn set_tooltip(&self, server: &str, vkey: &str) {
        self.send(TrayUpdate::Tooltip(tooltip_text(server, vkey)));
    }

    pub fn set_autostart_checked(&self, checked: bool) {
        self.send(TrayUpdate::AutostartChecked(checked));
    }

    /// Requests the tray to shut down.
    pub fn shutdown(&self) {
        self.send(TrayUpdate::Shutdown);
    }

    fn send(&self, update: TrayUpdate) {
        if self.update_tx.send(update).is_err() {
            tracing::debug!("tray is gone, update dropped");
        }
    }
}

impl TrayUpdates {
    /// Tries to receive an update (non-blocking).
    pub fn try_recv(&self) -> Option<TrayUpdate> {
        self.update_rx.try_recv().ok()
    }

    /// Returns every update queued so far.
    pub fn drain(&self) -> Vec<TrayUpdate> {
        self.update_rx.try_iter().collect()
    }
}
