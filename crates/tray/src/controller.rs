//! Menu action dispatch.
//!
//! [`TrayController`] owns everything the three menu actions touch and
//! handles one [`MenuAction`] at a time on the tray thread.

use npc_launcher_autostart::Autostart;
use npc_launcher_config::{ConfigError, ConfigFile, Configuration, Flags, SharedConfig};

use crate::menu::{MenuAction, MenuState};
use crate::prompt::ConfigPrompt;
use crate::tray::TrayHandle;

pub const EDIT_CONFIG_TITLE: &str = "Input server and vkey";
pub const EDIT_CONFIG_HINT: &str = "Like this: -server=xx.com:8080 -vkey=xxxx";

/// What the tray event loop should do after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Continue,
    Quit,
}

pub struct TrayController {
    autostart: Box<dyn Autostart>,
    prompt: Box<dyn ConfigPrompt>,
    config: SharedConfig,
    file: ConfigFile,
    tray: TrayHandle,
    state: MenuState,
}

impl TrayController {
    /// Creates the controller, reading the current autostart registration
    /// so the checkbox starts out correct.
    pub fn new(
        title: &str,
        autostart: Box<dyn Autostart>,
        prompt: Box<dyn ConfigPrompt>,
        config: SharedConfig,
        file: ConfigFile,
        tray: TrayHandle,
    ) -> Self {
        let snapshot = config.snapshot();
        let state = MenuState {
            title: title.to_string(),
            autostart_enabled: autostart.is_enabled(),
            server: snapshot.server_addr,
            vkey: snapshot.verify_key,
        };
        Self {
            autostart,
            prompt,
            config,
            file,
            tray,
            state,
        }
    }

    /// State the menu was built from at startup (tooltip values are
    /// refreshed by the supervisor afterwards).
    pub fn state(&self) -> &MenuState {
        &self.state
    }

    pub fn handle(&mut self, action: MenuAction) -> Dispatch {
        tracing::debug!(?action, "tray action");
        match action {
            MenuAction::ToggleAutostart => {
                self.toggle_autostart();
                Dispatch::Continue
            }
            MenuAction::EditConfig => {
                self.edit_config();
                Dispatch::Continue
            }
            MenuAction::Quit => {
                tracing::info!("quit requested via tray");
                self.tray.shutdown();
                Dispatch::Quit
            }
        }
    }

    /// Flips the registration. The checkbox follows the outcome of the
    /// registration call, so a failure re-asserts the previous state.
    fn toggle_autostart(&mut self) {
        let result = if self.state.autostart_enabled {
            self.autostart.disable().map(|()| false)
        } else {
            self.autostart.enable().map(|()| true)
        };

        match result {
            Ok(enabled) => self.state.autostart_enabled = enabled,
            Err(e) => {
                let action = if self.state.autostart_enabled { "disable" } else { "enable" };
                tracing::error!(error = %e, "failed to {action} autostart");
            }
        }

        self.tray.set_autostart_checked(self.state.autostart_enabled);
    }

    fn edit_config(&mut self) {
        let default = prefill(&self.config.snapshot());

        let Some(line) = self.prompt.ask(EDIT_CONFIG_TITLE, EDIT_CONFIG_HINT, &default) else {
            tracing::info!("config edit cancelled");
            return;
        };

        let line = line.trim();
        if line.is_empty() {
            tracing::info!("empty config input, nothing changed");
            return;
        }

        match self.apply_config_line(line) {
            Ok(config) => tracing::info!(
                server = %config.server_addr,
                path = %self.file.path().display(),
                "config saved, applies on next reconnect"
            ),
            Err(e) => tracing::error!(error = %e, input = line, "config input rejected"),
        }
    }

    /// Parses `line` as flags, applies it to the shared configuration and
    /// persists the result.
    pub fn apply_config_line(&self, line: &str) -> Result<Configuration, ConfigError> {
        let flags = Flags::parse_line(line)?;
        if let Some(flag) = flags.startup_only() {
            return Err(ConfigError::StartupOnly(flag));
        }
        let config = self.config.update(|c| flags.apply(c));
        self.file.persist(&config)?;
        Ok(config)
    }
}

/// Dialog text for the current values. The dialog line is split on
/// whitespace, so a value containing any is left out; submitting the line
/// unchanged then keeps it.
fn prefill(config: &Configuration) -> String {
    [("server", &config.server_addr), ("vkey", &config.verify_key)]
        .into_iter()
        .filter(|(_, value)| !value.is_empty() && !value.contains(char::is_whitespace))
        .map(|(flag, value)| format!("-{flag}={value}"))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use npc_launcher_autostart::AutostartError;

    use super::*;
    use crate::tray::{TrayUpdate, TrayUpdates, channel};

    #[derive(Clone, Default)]
    struct FakeAutostart {
        enabled: Arc<Mutex<bool>>,
        fail: bool,
        calls: Arc<Mutex<Vec<&'static str>>>,
    }

    impl Autostart for FakeAutostart {
        fn is_enabled(&self) -> bool {
            *self.enabled.lock().unwrap()
        }

        fn enable(&self) -> Result<(), AutostartError> {
            self.calls.lock().unwrap().push("enable");
            if self.fail {
                return Err(AutostartError::Command("access denied".into()));
            }
            *self.enabled.lock().unwrap() = true;
            Ok(())
        }

        fn disable(&self) -> Result<(), AutostartError> {
            self.calls.lock().unwrap().push("disable");
            if self.fail {
                return Err(AutostartError::Command("access denied".into()));
            }
            *self.enabled.lock().unwrap() = false;
            Ok(())
        }
    }

    /// Returns canned answers in order, then `None`.
    #[derive(Clone, Default)]
    struct FakePrompt {
        answers: Arc<Mutex<Vec<Option<String>>>>,
        defaults: Arc<Mutex<Vec<String>>>,
    }

    impl FakePrompt {
        fn answering(answers: &[Option<&str>]) -> Self {
            let prompt = Self::default();
            *prompt.answers.lock().unwrap() =
                answers.iter().rev().map(|a| a.map(String::from)).collect();
            prompt
        }
    }

    impl ConfigPrompt for FakePrompt {
        fn ask(&self, _title: &str, _message: &str, default: &str) -> Option<String> {
            self.defaults.lock().unwrap().push(default.to_string());
            self.answers.lock().unwrap().pop().flatten()
        }
    }

    struct Fixture {
        _tmp: tempfile::TempDir,
        file: ConfigFile,
        config: SharedConfig,
        updates: TrayUpdates,
        controller: TrayController,
    }

    fn fixture(autostart: FakeAutostart, prompt: FakePrompt) -> Fixture {
        let tmp = tempfile::tempdir().unwrap();
        let file = ConfigFile::new(tmp.path().join("npc.toml"));
        file.ensure_path();
        let config = SharedConfig::default();
        let (handle, updates) = channel();
        let controller = TrayController::new(
            "npc",
            Box::new(autostart),
            Box::new(prompt),
            config.clone(),
            file.clone(),
            handle,
        );
        Fixture {
            _tmp: tmp,
            file,
            config,
            updates,
            controller,
        }
    }

    #[test]
    fn initial_state_reads_registration() {
        let autostart = FakeAutostart::default();
        *autostart.enabled.lock().unwrap() = true;
        let fx = fixture(autostart, FakePrompt::default());
        assert!(fx.controller.state().autostart_enabled);
    }

    #[test]
    fn toggle_enables_then_disables() {
        let autostart = FakeAutostart::default();
        let mut fx = fixture(autostart.clone(), FakePrompt::default());

        assert_eq!(fx.controller.handle(MenuAction::ToggleAutostart), Dispatch::Continue);
        assert!(autostart.is_enabled());
        assert!(fx.controller.state().autostart_enabled);

        fx.controller.handle(MenuAction::ToggleAutostart);
        assert!(!autostart.is_enabled());
        assert!(!fx.controller.state().autostart_enabled);

        assert_eq!(
            fx.updates.drain(),
            [TrayUpdate::AutostartChecked(true), TrayUpdate::AutostartChecked(false)]
        );
        assert_eq!(*autostart.calls.lock().unwrap(), ["enable", "disable"]);
    }

    #[test]
    fn failed_toggle_leaves_checkbox_unchanged() {
        let autostart = FakeAutostart {
            fail: true,
            ..FakeAutostart::default()
        };
        let mut fx = fixture(autostart.clone(), FakePrompt::default());

        fx.controller.handle(MenuAction::ToggleAutostart);

        assert!(!fx.controller.state().autostart_enabled);
        assert_eq!(fx.updates.drain(), [TrayUpdate::AutostartChecked(false)]);
    }

    #[test]
    fn edit_config_persists_dialog_line() {
        let prompt = FakePrompt::answering(&[Some("-server=host:1234 -vkey=abcd")]);
        let mut fx = fixture(FakeAutostart::default(), prompt);

        assert_eq!(fx.controller.handle(MenuAction::EditConfig), Dispatch::Continue);

        let content = std::fs::read_to_string(fx.file.path()).unwrap();
        assert!(content.contains("server='host:1234'"));
        assert!(content.contains("vkey='abcd'"));

        let values = fx.file.load_values().unwrap();
        assert_eq!(values.server.as_deref(), Some("host:1234"));
        assert_eq!(values.vkey.as_deref(), Some("abcd"));
        assert_eq!(fx.config.snapshot().server_addr, "host:1234");
    }

    #[test]
    fn edit_config_prefills_current_values() {
        let prompt = FakePrompt::answering(&[None, None]);
        let mut fx = fixture(FakeAutostart::default(), prompt.clone());

        fx.controller.handle(MenuAction::EditConfig);
        fx.config.update(|c| {
            c.server_addr = "a:1".into();
            c.verify_key = "k".into();
        });
        fx.controller.handle(MenuAction::EditConfig);

        assert_eq!(*prompt.defaults.lock().unwrap(), ["", "-server=a:1 -vkey=k"]);
    }

    #[test]
    fn cancelled_dialog_changes_nothing() {
        let prompt = FakePrompt::answering(&[None]);
        let mut fx = fixture(FakeAutostart::default(), prompt);
        let before = std::fs::read_to_string(fx.file.path()).unwrap();

        fx.controller.handle(MenuAction::EditConfig);

        assert_eq!(std::fs::read_to_string(fx.file.path()).unwrap(), before);
        assert_eq!(fx.config.snapshot(), Configuration::default());
    }

    #[test]
    fn empty_submission_changes_nothing() {
        let prompt = FakePrompt::answering(&[Some("   ")]);
        let mut fx = fixture(FakeAutostart::default(), prompt);
        let before = std::fs::read_to_string(fx.file.path()).unwrap();

        fx.controller.handle(MenuAction::EditConfig);

        assert_eq!(std::fs::read_to_string(fx.file.path()).unwrap(), before);
    }

    #[test]
    fn invalid_input_is_not_persisted() {
        let prompt = FakePrompt::answering(&[Some("-server=a:1 -nope=2")]);
        let mut fx = fixture(FakeAutostart::default(), prompt);
        let before = std::fs::read_to_string(fx.file.path()).unwrap();

        fx.controller.handle(MenuAction::EditConfig);

        assert_eq!(std::fs::read_to_string(fx.file.path()).unwrap(), before);
        assert!(fx.config.snapshot().server_addr.is_empty());
    }

    #[test]
    fn partial_line_keeps_other_value() {
        let fx = fixture(FakeAutostart::default(), FakePrompt::default());
        fx.controller.apply_config_line("-server=a:1 -vkey=k").unwrap();

        let config = fx.controller.apply_config_line("-vkey=k2").unwrap();

        assert_eq!(config.server_addr, "a:1");
        let values = fx.file.load_values().unwrap();
        assert_eq!(values.server.as_deref(), Some("a:1"));
        assert_eq!(values.vkey.as_deref(), Some("k2"));
    }

    #[test]
    fn prefill_skips_values_with_whitespace() {
        let prompt = FakePrompt::answering(&[Some("")]);
        let mut fx = fixture(FakeAutostart::default(), prompt.clone());
        fx.config.update(|c| {
            c.server_addr = "h:1".into();
            c.verify_key = "a b".into();
        });

        fx.controller.handle(MenuAction::EditConfig);
        let default = prompt.defaults.lock().unwrap()[0].clone();
        assert_eq!(default, "-server=h:1");

        // Submitting the prefilled line unchanged keeps both values.
        let config = fx.controller.apply_config_line(&default).unwrap();
        assert_eq!(config.server_addr, "h:1");
        assert_eq!(config.verify_key, "a b");
        let values = fx.file.load_values().unwrap();
        assert_eq!(values.vkey.as_deref(), Some("a b"));
    }

    #[test]
    fn dash_prefixed_key_from_dialog() {
        let prompt = FakePrompt::answering(&[Some("-server=h:1 -vkey -abc")]);
        let mut fx = fixture(FakeAutostart::default(), prompt);

        fx.controller.handle(MenuAction::EditConfig);

        assert_eq!(fx.config.snapshot().verify_key, "-abc");
        assert_eq!(fx.file.load_values().unwrap().vkey.as_deref(), Some("-abc"));
    }

    #[test]
    fn startup_only_flags_are_rejected() {
        let fx = fixture(FakeAutostart::default(), FakePrompt::default());
        let before = std::fs::read_to_string(fx.file.path()).unwrap();

        let err = fx
            .controller
            .apply_config_line("-server=a:1 -npc_bin=/usr/bin/npc")
            .unwrap_err();

        assert!(matches!(err, ConfigError::StartupOnly("npc_bin")));
        assert_eq!(std::fs::read_to_string(fx.file.path()).unwrap(), before);
        assert!(fx.config.snapshot().server_addr.is_empty());
    }

    #[test]
    fn quit_requests_shutdown() {
        let mut fx = fixture(FakeAutostart::default(), FakePrompt::default());

        assert_eq!(fx.controller.handle(MenuAction::Quit), Dispatch::Quit);
        assert_eq!(fx.updates.drain(), [TrayUpdate::Shutdown]);
    }
}
