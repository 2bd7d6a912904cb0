//! Configuration cell shared between the tray thread and the supervisor.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::config::Configuration;

/// Mutex-guarded [`Configuration`] handed to every component that reads or
/// writes it. Cloning shares the same cell.
///
/// Readers always take a full snapshot and writers apply a whole update
/// under the lock, so a dialog submission and a file reload never
/// interleave field by field.
#[derive(Debug, Clone, Default)]
pub struct SharedConfig {
    inner: Arc<Mutex<Configuration>>,
}

impl SharedConfig {
    pub fn new(config: Configuration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(config)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Configuration> {
        // A panic mid-update cannot leave a `Configuration` half-valid, so a
        // poisoned lock is still usable.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns a copy of the current configuration.
    pub fn snapshot(&self) -> Configuration {
        self.lock().clone()
    }

    /// Applies `f` under the lock and returns the updated configuration.
    pub fn update<F>(&self, f: F) -> Configuration
    where
        F: FnOnce(&mut Configuration),
    {
        let mut guard = self.lock();
        f(&mut guard);
        guard.clone()
    }
}
