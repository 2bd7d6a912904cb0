//! XDG autostart desktop entries.

use std::path::PathBuf;

use crate::{Autostart, AutostartApp, EntryFile, Unavailable};

pub(crate) fn backend(app: AutostartApp) -> Box<dyn Autostart> {
    let dir = autostart_dir(
        std::env::var("XDG_CONFIG_HOME").ok(),
        std::env::var("HOME").ok(),
    );
    match dir {
        Some(dir) => {
            let path = dir.join(format!("{}.desktop", app.name));
            Box::new(EntryFile::new(path, desktop_entry(&app)))
        }
        None => Box::new(Unavailable {
            reason: "neither XDG_CONFIG_HOME nor HOME is set",
        }),
    }
}

/// `$XDG_CONFIG_HOME/autostart`, else `$HOME/.config/autostart`.
fn autostart_dir(xdg_config_home: Option<String>, home: Option<String>) -> Option<PathBuf> {
    xdg_config_home
        .filter(|p| !p.is_empty())
        .map(PathBuf::from)
        .or_else(|| {
            home.filter(|h| !h.is_empty())
                .map(|h| PathBuf::from(h).join(".config"))
        })
        .map(|config| config.join("autostart"))
}

fn quote_exec_arg(arg: &str) -> String {
    if arg.is_empty() || arg.contains([' ', '\t', '"', '\'', '\\', '$', '`']) {
        let escaped = arg
            .replace('\\', "\\\\")
            .replace('"', "\\\"")
            .replace('$', "\\$")
            .replace('`', "\\`");
        format!("\"{escaped}\"")
    } else {
        arg.to_string()
    }
}

fn desktop_entry(app: &AutostartApp) -> String {
    let exec = app
        .exec
        .iter()
        .map(|arg| quote_exec_arg(arg))
        .collect::<Vec<_>>()
        .join(" ");
    format!(
        "[Desktop Entry]\n\
         Type=Application\n\
         Name={}\n\
         Exec={exec}\n\
         X-GNOME-Autostart-enabled=true\n",
        app.display_name
    )
}
