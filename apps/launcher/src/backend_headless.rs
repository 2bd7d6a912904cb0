//! Tray backend for builds without a native tray (the `headless` feature, or
//! Linux without `gui`).
//!
//! There is no icon or menu: tray updates are logged and the launcher runs
//! until Ctrl-C.

use std::time::Duration;

use npc_launcher_tray::{TrayController, TrayUpdate, TrayUpdates};
use tokio_util::sync::CancellationToken;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub fn run(
    controller: TrayController,
    updates: TrayUpdates,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let state = controller.state();
    tracing::info!(
        autostart = state.autostart_enabled,
        tooltip = %state.tooltip(),
        "running without a tray icon, press Ctrl-C to quit"
    );

    while !cancel.is_cancelled() {
        for update in updates.drain() {
            match update {
                TrayUpdate::Tooltip(text) => tracing::debug!(tooltip = %text, "tray tooltip"),
                TrayUpdate::AutostartChecked(checked) => {
                    tracing::debug!(checked, "autostart checkbox")
                }
                TrayUpdate::Shutdown => return Ok(()),
            }
        }
        std::thread::sleep(POLL_INTERVAL);
    }

    Ok(())
}
