//! LaunchAgent plists.

use std::path::PathBuf;

use crate::{Autostart, AutostartApp, EntryFile, Unavailable};

pub(crate) fn backend(app: AutostartApp) -> Box<dyn Autostart> {
    match std::env::var("HOME").ok().filter(|h| !h.is_empty()) {
        Some(home) => {
            let path = PathBuf::from(home)
                .join("Library")
                .join("LaunchAgents")
                .join(format!("{}.plist", app.name));
            Box::new(EntryFile::new(path, launch_agent(&app)))
        }
        None => Box::new(Unavailable {
            reason: "HOME is not set",
        }),
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn launch_agent(app: &AutostartApp) -> String {
    let args: String = app
        .exec
        .iter()
        .map(|arg| format!("    <string>{}</string>\n", escape_xml(arg)))
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
  <key>Label</key>
  <string>{}</string>
  <key>ProgramArguments</key>
  <array>
{args}  </array>
  <key>RunAtLoad</key>
  <true/>
</dict>
</plist>
"#,
        escape_xml(&app.name)
    )
}
