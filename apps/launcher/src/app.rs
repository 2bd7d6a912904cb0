//! Application orchestrator: wires the launcher components together.

use std::time::Duration;

use npc_launcher_autostart::AutostartApp;
use npc_launcher_config::{ConfigFile, Configuration, Flags, SharedConfig, default_config_path};
use npc_launcher_supervisor::{DEFAULT_NPC_BIN, ProcessFactory, Supervisor};
use npc_launcher_tray::{SystemPrompt, TrayConfig, TrayController};
use tokio_util::sync::CancellationToken;

/// How long shutdown waits for runtime tasks to wind down.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(2);

/// Runs the launcher until the user quits.
///
/// The tray backend owns the main thread; the reconnect supervisor and the
/// Ctrl-C watcher run on the tokio runtime.
pub fn run(flags: &Flags, config: Configuration) -> anyhow::Result<()> {
    let file = ConfigFile::new(flags.config.clone().unwrap_or_else(default_config_path));
    file.ensure_path();
    tracing::info!(path = %file.path().display(), "using config file");

    let shared = SharedConfig::new(config);
    let cancel = CancellationToken::new();

    // -- Tray --
    let tray_config = TrayConfig::default();
    let (tray_handle, tray_updates) = npc_launcher_tray::channel();
    let autostart = npc_launcher_autostart::for_app(AutostartApp::current_exe(&tray_config.app_id));
    let controller = TrayController::new(
        &tray_config.title,
        autostart,
        Box::new(SystemPrompt),
        shared.clone(),
        file.clone(),
        tray_handle.clone(),
    );

    // -- Supervisor --
    let program = flags
        .npc_bin
        .clone()
        .unwrap_or_else(|| DEFAULT_NPC_BIN.into());
    tracing::info!(program = %program.display(), "tunnel client executable");

    let supervisor = Supervisor::new(ProcessFactory::new(program), file, shared).on_reload(
        Box::new(move |config| tray_handle.set_tooltip(&config.server_addr, &config.verify_key)),
    );

    let runtime = tokio::runtime::Runtime::new()?;

    let supervisor_task = runtime.spawn({
        let cancel = cancel.clone();
        async move { supervisor.run(cancel).await }
    });

    runtime.spawn({
        let cancel = cancel.clone();
        async move {
            tokio::select! {
                _ = cancel.cancelled() => {}
                result = tokio::signal::ctrl_c() => match result {
                    Ok(()) => {
                        tracing::info!("SIGINT received, shutting down");
                        cancel.cancel();
                    }
                    Err(e) => tracing::warn!(error = %e, "failed to listen for Ctrl-C"),
                },
            }
        }
    });

    tracing::info!("launcher ready");

    // -- Main loop: tray until quit --
    let result = crate::backend::run(controller, tray_updates, cancel.clone());

    // -- Graceful shutdown --
    tracing::info!("stopping supervisor...");
    cancel.cancel();
    if let Err(e) = runtime.block_on(supervisor_task) {
        tracing::error!(error = %e, "supervisor task failed");
    }
    runtime.shutdown_timeout(SHUTDOWN_GRACE);

    result
}
