//! Tunnel client collaborator interface.

use std::future::Future;
use std::pin::Pin;

use npc_launcher_config::{ConnType, Configuration};

/// Errors reported by a tunnel client session.
#[derive(Debug, thiserror::Error)]
pub enum TunnelError {
    #[error("failed to start tunnel client: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("tunnel client exited with {0}")]
    Exited(String),

    #[error("tunnel session failed: {0}")]
    Session(String),
}

/// Parameters a tunnel client is constructed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientParams {
    pub server_addr: String,
    pub verify_key: String,
    pub conn_type: ConnType,
    /// `None` when the client should dial the server directly.
    pub proxy_url: Option<String>,
}

impl From<&Configuration> for ClientParams {
    fn from(config: &Configuration) -> Self {
        Self {
            server_addr: config.server_addr.clone(),
            verify_key: config.verify_key.clone(),
            conn_type: config.conn_type,
            proxy_url: Some(config.proxy_url.clone()).filter(|p| !p.is_empty()),
        }
    }
}

/// A boxed future returned by [`TunnelClient::start`].
pub type ClientFuture = Pin<Box<dyn Future<Output = Result<(), TunnelError>> + Send>>;

/// One tunnel session.
///
/// `start` consumes the handle and resolves when the session ends, whether
/// it closed normally or failed. Dropping the future abandons the session.
pub trait TunnelClient: Send {
    fn start(self: Box<Self>) -> ClientFuture;
}

/// Builds a new [`TunnelClient`] for every connection attempt.
pub trait ClientFactory: Send + Sync + 'static {
    fn create(&self, params: &ClientParams) -> Box<dyn TunnelClient>;
}
