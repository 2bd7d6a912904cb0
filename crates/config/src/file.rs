//! The `npc.toml` configuration file.
//!
//! The file holds `key='value'` lines (a TOML subset). Only `server` and
//! `vkey` are read; every other key is ignored. A missing file is created
//! with a commented template so users have something to edit.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::config::Configuration;
use crate::error::ConfigError;
use crate::shared::SharedConfig;

/// File name used when no `-config` flag is given.
pub const DEFAULT_CONFIG_FILE: &str = "npc.toml";

#[cfg(windows)]
const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
const LINE_ENDING: &str = "\n";

/// Contents written to a freshly created config file.
pub const CONFIG_TEMPLATE: &str = "#server='xx.com:8080'\n#vkey='xxxx'\n";

/// Returns `npc.toml` next to the running executable, falling back to the
/// working directory when the executable path is unavailable.
pub fn default_config_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(DEFAULT_CONFIG_FILE)))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

/// Recognized keys read from the file. `None` means the key was absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileValues {
    pub server: Option<String>,
    pub vkey: Option<String>,
}

impl FileValues {
    /// Assigns present keys to `config`; absent keys keep their value.
    pub fn apply(&self, config: &mut Configuration) {
        if let Some(server) = &self.server {
            config.server_addr.clone_from(server);
        }
        if let Some(vkey) = &self.vkey {
            config.verify_key.clone_from(vkey);
        }
    }
}

#[derive(Deserialize)]
struct RawFile {
    server: Option<toml::Value>,
    vkey: Option<toml::Value>,
}

fn coerce(key: &str, value: Option<toml::Value>) -> Result<Option<String>, ConfigError> {
    let Some(value) = value else {
        return Ok(None);
    };
    let text = match value {
        toml::Value::String(s) => s,
        toml::Value::Integer(i) => i.to_string(),
        toml::Value::Float(f) => f.to_string(),
        toml::Value::Boolean(b) => b.to_string(),
        other => {
            return Err(ConfigError::InvalidValue {
                key: key.to_string(),
                found: other.type_str(),
            });
        }
    };
    Ok(Some(text.trim().to_string()))
}

/// Renders `value` as a TOML string, preferring the `'literal'` form.
fn quote(value: &str) -> String {
    if value.contains(['\'', '\n', '\r']) {
        toml::Value::String(value.to_string()).to_string()
    } else {
        format!("'{value}'")
    }
}

/// Handle to the config file at a fixed path.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    path: PathBuf,
}

impl ConfigFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Makes sure the file exists, writing [`CONFIG_TEMPLATE`] if it does not.
    ///
    /// Never fails: directory or write errors are logged and the caller
    /// carries on. An existing file is never touched.
    pub fn ensure_path(&self) -> &Path {
        if self.path.exists() {
            return &self.path;
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty())
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            tracing::warn!(dir = %parent.display(), error = %e, "failed to create config directory");
        }

        let template = CONFIG_TEMPLATE.replace('\n', LINE_ENDING);
        match std::fs::write(&self.path, template) {
            Ok(()) => tracing::info!(path = %self.path.display(), "created config file template"),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to create config file")
            }
        }

        &self.path
    }

    /// Reads and parses the recognized keys from the file.
    pub fn load_values(&self) -> Result<FileValues, ConfigError> {
        let content = std::fs::read_to_string(&self.path)?;
        let raw: RawFile = toml::from_str(&content)?;
        Ok(FileValues {
            server: coerce("server", raw.server)?,
            vkey: coerce("vkey", raw.vkey)?,
        })
    }

    /// Re-reads the file into `shared` and returns the resulting snapshot.
    ///
    /// On any read or parse failure the error is logged and the values
    /// already held in memory are kept.
    pub fn reload(&self, shared: &SharedConfig) -> Configuration {
        self.ensure_path();
        match self.load_values() {
            Ok(values) => shared.update(|config| values.apply(config)),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "failed to reload config, keeping previous values"
                );
                shared.snapshot()
            }
        }
    }

    /// Overwrites the file with the current server address and key.
    pub fn persist(&self, config: &Configuration) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let content = format!(
            "server={}{LINE_ENDING}vkey={}{LINE_ENDING}",
            quote(&config.server_addr),
            quote(&config.verify_key),
        );
        std::fs::write(&self.path, content)?;

        tracing::debug!(path = %self.path.display(), "config saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file_in(dir: &tempfile::TempDir) -> ConfigFile {
        ConfigFile::new(dir.path().join("npc.toml"))
    }

    #[test]
    fn ensure_path_creates_template() {
        let tmp = tempfile::tempdir().unwrap();
        let file = ConfigFile::new(tmp.path().join("nested").join("dir").join("npc.toml"));

        file.ensure_path();

        let content = std::fs::read_to_string(file.path()).unwrap();
        assert!(content.contains("#server='xx.com:8080'"));
        assert!(content.contains("#vkey='xxxx'"));
    }

    #[test]
    fn ensure_path_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let file = file_in(&tmp);
        std::fs::write(file.path(), "server='keep:1'\n").unwrap();

        file.ensure_path();
        file.ensure_path();

        assert_eq!(std::fs::read_to_string(file.path()).unwrap(), "server='keep:1'\n");
    }

    #[test]
    fn ensure_path_does_not_panic_on_unwritable_location() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();
        // Parent is a regular file, so directory creation and the write fail.
        let file = ConfigFile::new(blocker.join("npc.toml"));

        file.ensure_path();
        assert!(!file.path().exists());
    }

    #[test]
    fn template_parses_to_no_values() {
        let tmp = tempfile::tempdir().unwrap();
        let file = file_in(&tmp);
        file.ensure_path();

        assert_eq!(file.load_values().unwrap(), FileValues::default());
    }

    #[test]
    fn load_server_and_vkey() {
        let tmp = tempfile::tempdir().unwrap();
        let file = file_in(&tmp);
        std::fs::write(file.path(), "server='A'\r\nvkey='B'\r\n").unwrap();

        let values = file.load_values().unwrap();
        assert_eq!(values.server.as_deref(), Some("A"));
        assert_eq!(values.vkey.as_deref(), Some("B"));
    }

    #[test]
    fn load_strips_whitespace() {
        let tmp = tempfile::tempdir().unwrap();
        let file = file_in(&tmp);
        std::fs::write(file.path(), "  server = ' host:80 '\nvkey=\"  key \"\n").unwrap();

        let values = file.load_values().unwrap();
        assert_eq!(values.server.as_deref(), Some("host:80"));
        assert_eq!(values.vkey.as_deref(), Some("key"));
    }

    #[test]
    fn load_ignores_unknown_keys() {
        let tmp = tempfile::tempdir().unwrap();
        let file = file_in(&tmp);
        std::fs::write(file.path(), "server='s'\nlog_level=3\n[extra]\nkey='x'\n").unwrap();

        let values = file.load_values().unwrap();
        assert_eq!(values.server.as_deref(), Some("s"));
        assert!(values.vkey.is_none());
    }

    #[test]
    fn load_coerces_scalars() {
        let tmp = tempfile::tempdir().unwrap();
        let file = file_in(&tmp);
        std::fs::write(file.path(), "vkey=12345\n").unwrap();

        assert_eq!(file.load_values().unwrap().vkey.as_deref(), Some("12345"));
    }

    #[test]
    fn load_rejects_table_value() {
        let tmp = tempfile::tempdir().unwrap();
        let file = file_in(&tmp);
        std::fs::write(file.path(), "server=['a', 'b']\n").unwrap();

        let err = file.load_values().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "server"));
    }

    #[test]
    fn reload_applies_values() {
        let tmp = tempfile::tempdir().unwrap();
        let file = file_in(&tmp);
        std::fs::write(file.path(), "server='A'\nvkey='B'\n").unwrap();
        let shared = SharedConfig::default();

        let snapshot = file.reload(&shared);

        assert_eq!(snapshot.server_addr, "A");
        assert_eq!(snapshot.verify_key, "B");
        assert_eq!(shared.snapshot(), snapshot);
    }

    #[test]
    fn reload_keeps_missing_keys() {
        let tmp = tempfile::tempdir().unwrap();
        let file = file_in(&tmp);
        std::fs::write(file.path(), "vkey='new'\n").unwrap();
        let shared = SharedConfig::new(Configuration {
            server_addr: "prior:1".into(),
            verify_key: "old".into(),
            ..Configuration::default()
        });

        let snapshot = file.reload(&shared);

        assert_eq!(snapshot.server_addr, "prior:1");
        assert_eq!(snapshot.verify_key, "new");
    }

    #[test]
    fn reload_malformed_keeps_prior_values() {
        let malformed = [
            "server='unterminated\n",
            "server = \n",
            "= 'x'\n",
            "server='a'\nserver='b'\n",
            "[[[\n",
            "server=[1]\n",
        ];
        for content in malformed {
            let tmp = tempfile::tempdir().unwrap();
            let file = file_in(&tmp);
            std::fs::write(file.path(), content).unwrap();
            let prior = Configuration {
                server_addr: "prior:1".into(),
                verify_key: "prior-key".into(),
                ..Configuration::default()
            };
            let shared = SharedConfig::new(prior.clone());

            let snapshot = file.reload(&shared);

            assert_eq!(snapshot, prior, "content: {content:?}");
            assert_eq!(shared.snapshot(), prior);
        }
    }

    #[test]
    fn reload_creates_missing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let file = file_in(&tmp);
        let shared = SharedConfig::default();

        let snapshot = file.reload(&shared);

        assert!(file.path().exists());
        assert!(snapshot.server_addr.is_empty());
        assert!(snapshot.verify_key.is_empty());
    }

    #[test]
    fn persist_then_load() {
        let tmp = tempfile::tempdir().unwrap();
        let file = file_in(&tmp);
        std::fs::write(file.path(), "server='old'\nother='dropped'\n").unwrap();
        let config = Configuration {
            server_addr: "host:1234".into(),
            verify_key: "abcd".into(),
            ..Configuration::default()
        };

        file.persist(&config).unwrap();

        let content = std::fs::read_to_string(file.path()).unwrap();
        assert!(content.contains("server='host:1234'"));
        assert!(content.contains("vkey='abcd'"));
        assert!(!content.contains("other"));

        let values = file.load_values().unwrap();
        assert_eq!(values.server.as_deref(), Some("host:1234"));
        assert_eq!(values.vkey.as_deref(), Some("abcd"));
    }

    #[test]
    fn persist_escapes_single_quotes() {
        let tmp = tempfile::tempdir().unwrap();
        let file = file_in(&tmp);
        let config = Configuration {
            server_addr: "h:1".into(),
            verify_key: "it's".into(),
            ..Configuration::default()
        };

        file.persist(&config).unwrap();

        assert_eq!(file.load_values().unwrap().vkey.as_deref(), Some("it's"));
    }

    #[test]
    fn default_path_file_name() {
        let path = default_config_path();
        assert_eq!(path.file_name().unwrap(), DEFAULT_CONFIG_FILE);
    }
}
