//! File-backed registration (XDG desktop entries, LaunchAgent plists).

use std::path::{Path, PathBuf};

use crate::{Autostart, AutostartError};

/// A registration that exists exactly when `path` exists.
#[derive(Debug, Clone)]
pub struct EntryFile {
    path: PathBuf,
    contents: String,
}

impl EntryFile {
    pub fn new(path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Autostart for EntryFile {
    fn is_enabled(&self) -> bool {
        self.path.is_file()
    }

    fn enable(&self) -> Result<(), AutostartError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, &self.contents)?;
        tracing::info!(path = %self.path.display(), "autostart enabled");
        Ok(())
    }

    fn disable(&self) -> Result<(), AutostartError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::info!(path = %self.path.display(), "autostart disabled");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
