//! Tunnel client backed by the external `npc` executable.

use std::path::PathBuf;

use tokio::process::Command;

use crate::client::{ClientFactory, ClientFuture, ClientParams, TunnelClient, TunnelError};

/// Executable looked up on `PATH` when no `-npc_bin` is given.
pub const DEFAULT_NPC_BIN: &str = "npc";

/// Spawns one `npc` process per connection attempt.
#[derive(Debug, Clone)]
pub struct ProcessFactory {
    program: PathBuf,
}

impl ProcessFactory {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for ProcessFactory {
    fn default() -> Self {
        Self::new(DEFAULT_NPC_BIN)
    }
}

impl ClientFactory for ProcessFactory {
    fn create(&self, params: &ClientParams) -> Box<dyn TunnelClient> {
        Box::new(ProcessClient {
            program: self.program.clone(),
            args: client_args(params),
        })
    }
}

/// Builds the npc command line for `params`.
fn client_args(params: &ClientParams) -> Vec<String> {
    let mut args = vec![
        format!("-server={}", params.server_addr),
        format!("-vkey={}", params.verify_key),
        format!("-type={}", params.conn_type),
    ];
    if let Some(proxy) = &params.proxy_url {
        args.push(format!("-proxy={proxy}"));
    }
    args
}

/// A single `npc` child process. The session lasts as long as the process.
#[derive(Debug)]
pub struct ProcessClient {
    program: PathBuf,
    args: Vec<String>,
}

impl TunnelClient for ProcessClient {
    fn start(self: Box<Self>) -> ClientFuture {
        Box::pin(async move {
            let mut command = Command::new(&self.program);
            command.args(&self.args).kill_on_drop(true);

            #[cfg(windows)]
            {
                // CREATE_NO_WINDOW: the launcher is a tray app, no console.
                command.creation_flags(0x0800_0000);
            }

            let mut child = command.spawn().map_err(TunnelError::Spawn)?;
            tracing::debug!(
                program = %self.program.display(),
                pid = child.id(),
                "tunnel client process started"
            );

            let status = child.wait().await?;
            if status.success() {
                Ok(())
            } else {
                Err(TunnelError::Exited(status.to_string()))
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use npc_launcher_config::ConnType;

    fn params() -> ClientParams {
        ClientParams {
            server_addr: "host:8024".into(),
            verify_key: "abcd".into(),
            conn_type: ConnType::Tcp,
            proxy_url: None,
        }
    }

    #[test]
    fn args_without_proxy() {
        assert_eq!(
            client_args(&params()),
            ["-server=host:8024", "-vkey=abcd", "-type=tcp"]
        );
    }

    #[test]
    fn args_with_proxy() {
        let params = ClientParams {
            conn_type: ConnType::Kcp,
            proxy_url: Some("socks5://p:1080".into()),
            ..params()
        };
        assert_eq!(
            client_args(&params),
            [
                "-server=host:8024",
                "-vkey=abcd",
                "-type=kcp",
                "-proxy=socks5://p:1080"
            ]
        );
    }

    #[test]
    fn args_keep_empty_credentials() {
        let params = ClientParams {
            server_addr: String::new(),
            verify_key: String::new(),
            ..params()
        };
        assert_eq!(client_args(&params), ["-server=", "-vkey=", "-type=tcp"]);
    }

    #[tokio::test]
    async fn missing_program_is_spawn_error() {
        let factory = ProcessFactory::new("/nonexistent/npc-launcher-test-binary");
        let err = factory.create(&params()).start().await.unwrap_err();
        assert!(matches!(err, TunnelError::Spawn(_)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn successful_exit_is_ok() {
        let factory = ProcessFactory::new("true");
        factory.create(&params()).start().await.unwrap();
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn failing_exit_is_error() {
        let factory = ProcessFactory::new("false");
        let err = factory.create(&params()).start().await.unwrap_err();
        assert!(matches!(err, TunnelError::Exited(_)));
    }
}
