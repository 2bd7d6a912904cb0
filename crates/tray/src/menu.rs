//! Context menu model for the system tray.

/// Actions that can be triggered from the tray context menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuAction {
    /// Register or unregister launch-at-login.
    ToggleAutostart,
    /// Ask for a new server address and key.
    EditConfig,
    /// User requested to quit the application.
    Quit,
}

impl MenuAction {
    /// Stable identifier for native menu items.
    pub fn id(&self) -> &'static str {
        match self {
            MenuAction::ToggleAutostart => "autostart",
            MenuAction::EditConfig => "edit_config",
            MenuAction::Quit => "quit",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        [Self::ToggleAutostart, Self::EditConfig, Self::Quit]
            .into_iter()
            .find(|action| action.id() == id)
    }
}

/// A single menu item.
#[derive(Debug, Clone)]
pub struct MenuItem {
    /// Display text.
    pub label: String,
    /// Hover text, where the platform shows one.
    pub tooltip: String,
    /// Whether the item is enabled (clickable).
    pub enabled: bool,
    /// `Some` for checkbox items.
    pub checked: Option<bool>,
    /// Optional action triggered on click.
    pub action: Option<MenuAction>,
}

impl MenuItem {
    fn separator() -> Self {
        Self {
            label: String::new(),
            tooltip: String::new(),
            enabled: false,
            checked: None,
            action: None,
        }
    }

    pub fn is_separator(&self) -> bool {
        self.label.is_empty() && self.action.is_none()
    }
}

/// Tooltip shown on the tray icon.
pub fn tooltip_text(server: &str, vkey: &str) -> String {
    format!("server='{server}'\nvkey='{vkey}'")
}

/// Current state used to build the context menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuState {
    /// Tray title.
    pub title: String,
    /// Mirror of the OS launch-at-login registration.
    pub autostart_enabled: bool,
    pub server: String,
    pub vkey: String,
}

impl Default for MenuState {
    fn default() -> Self {
        Self {
            title: "npc".into(),
            autostart_enabled: false,
            server: String::new(),
            vkey: String::new(),
        }
    }
}

impl MenuState {
    pub fn tooltip(&self) -> String {
        tooltip_text(&self.server, &self.vkey)
    }

    /// Builds the menu items from the current state.
    pub fn build_menu(&self) -> Vec<MenuItem> {
        vec![
            MenuItem {
                label: "Auto Startup".into(),
                tooltip: format!("Auto Startup {} on boot", self.title),
                enabled: true,
                checked: Some(self.autostart_enabled),
                action: Some(MenuAction::ToggleAutostart),
            },
            MenuItem {
                label: "Edit Config".into(),
                tooltip: format!("Edit {} Config", self.title),
                enabled: true,
                checked: None,
                action: Some(MenuAction::EditConfig),
            },
            MenuItem::separator(),
            MenuItem {
                label: "Quit".into(),
                tooltip: format!("Quit {}", self.title),
                enabled: true,
                checked: None,
                action: Some(MenuAction::Quit),
            },
        ]
    }
}
