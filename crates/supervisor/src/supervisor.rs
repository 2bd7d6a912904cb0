//! The reconnect loop.

use std::time::Duration;

use npc_launcher_config::{ConfigFile, Configuration, SharedConfig};
use tokio_util::sync::CancellationToken;

use crate::client::{ClientFactory, ClientParams};

/// Fixed pause between the end of one session and the next attempt.
pub const RECONNECT_DELAY: Duration = Duration::from_secs(5);

/// Called with the freshly reloaded configuration before every attempt.
pub type ReloadCallback = Box<dyn Fn(&Configuration) + Send + Sync>;

/// Keeps a tunnel client running indefinitely.
///
/// Every iteration reloads the config file, notifies the reload callback,
/// builds a new client from the reloaded values and awaits its session.
/// Whatever the outcome, exactly one [`RECONNECT_DELAY`] elapses before the
/// next attempt. There is no retry limit and no backoff growth.
pub struct Supervisor<F> {
    factory: F,
    file: ConfigFile,
    config: SharedConfig,
    delay: Duration,
    on_reload: ReloadCallback,
}

impl<F: ClientFactory> Supervisor<F> {
    pub fn new(factory: F, file: ConfigFile, config: SharedConfig) -> Self {
        Self {
            factory,
            file,
            config,
            delay: RECONNECT_DELAY,
            on_reload: Box::new(|_| {}),
        }
    }

    /// Overrides the pause between attempts.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Registers the callback run after each reload (the tray tooltip).
    pub fn on_reload(mut self, callback: ReloadCallback) -> Self {
        self.on_reload = callback;
        self
    }

    /// Runs the reconnect loop until `cancel` fires.
    ///
    /// Cancellation interrupts both a running session (its client is
    /// dropped) and the delay.
    pub async fn run(&self, cancel: CancellationToken) {
        let mut attempt: u64 = 0;

        loop {
            attempt = attempt.saturating_add(1);

            let config = self.file.reload(&self.config);
            (self.on_reload)(&config);

            tracing::info!(
                attempt,
                server = %config.server_addr,
                vkey_set = !config.verify_key.is_empty(),
                conn_type = %config.conn_type,
                "starting tunnel client"
            );

            let client = self.factory.create(&ClientParams::from(&config));

            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::debug!(attempt, "tunnel session cancelled");
                    return;
                }
                result = client.start() => match result {
                    Ok(()) => tracing::info!(attempt, "tunnel session ended"),
                    Err(e) => tracing::warn!(attempt, error = %e, "tunnel client failed"),
                },
            }

            tracing::info!(
                delay_secs = self.delay.as_secs_f64(),
                "reconnecting after delay"
            );

            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::debug!("reconnect loop cancelled");
                    return;
                }
                _ = tokio::time::sleep(self.delay) => {}
            }
        }
    }
}
