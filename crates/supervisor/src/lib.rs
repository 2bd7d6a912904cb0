//! Reconnect supervisor for the npc tunnel client.
//!
//! The tunnel client itself is an external collaborator, represented by the
//! [`TunnelClient`] and [`ClientFactory`] traits. [`Supervisor`] builds a
//! fresh client from the current configuration, waits for it to finish,
//! sleeps a fixed delay and starts over, forever.
//!
//! [`ProcessFactory`] is the production collaborator: it runs the `npc`
//! executable as a child process.

mod client;
mod process;
mod supervisor;

pub use client::{ClientFactory, ClientFuture, ClientParams, TunnelClient, TunnelError};
pub use process::{DEFAULT_NPC_BIN, ProcessClient, ProcessFactory};
pub use supervisor::{RECONNECT_DELAY, ReloadCallback, Supervisor};
