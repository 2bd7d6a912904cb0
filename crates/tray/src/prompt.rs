//! Text-entry dialog used by "Edit Config".
//!
//! Native dialogs are shown by the platform's own tooling:
//! - Windows: PowerShell `Microsoft.VisualBasic.Interaction.InputBox`
//! - Linux: `zenity --entry`
//! - macOS: `osascript` with `display dialog`

use std::process::{Command, Output};

/// Asks the user for one line of text.
pub trait ConfigPrompt: Send {
    /// Returns `None` when the dialog was dismissed or could not be shown.
    fn ask(&self, title: &str, message: &str, default: &str) -> Option<String>;
}

/// Dialog backed by the platform's native tooling.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemPrompt;

impl ConfigPrompt for SystemPrompt {
    fn ask(&self, title: &str, message: &str, default: &str) -> Option<String> {
        match dialog_command(title, message, default).output() {
            Ok(output) => answer(output),
            Err(e) => {
                tracing::warn!(error = %e, "failed to show input dialog");
                None
            }
        }
    }
}

/// Successful exit means the user confirmed; anything else is a cancel.
fn answer(output: Output) -> Option<String> {
    output
        .status
        .success()
        .then(|| String::from_utf8_lossy(&output.stdout).trim().to_string())
}

#[cfg(target_os = "windows")]
fn dialog_command(title: &str, message: &str, default: &str) -> Command {
    use std::os::windows::process::CommandExt;

    // Single-quoted PowerShell strings escape a quote by doubling it.
    let quote = |s: &str| s.replace('\'', "''");
    let script = format!(
        "[void][Reflection.Assembly]::LoadWithPartialName('Microsoft.VisualBasic'); \
         [Microsoft.VisualBasic.Interaction]::InputBox('{}', '{}', '{}')",
        quote(message),
        quote(title),
        quote(default)
    );
    let mut command = Command::new("powershell");
    command
        .args(["-NoProfile", "-NonInteractive", "-Command", script.as_str()])
        .creation_flags(0x0800_0000);
    command
}

#[cfg(target_os = "macos")]
fn dialog_command(title: &str, message: &str, default: &str) -> Command {
    let quote = |s: &str| s.replace('\\', "\\\\").replace('"', "\\\"");
    let script = format!(
        "text returned of (display dialog \"{}\" default answer \"{}\" with title \"{}\")",
        quote(message),
        quote(default),
        quote(title)
    );
    let mut command = Command::new("osascript");
    command.args(["-e", script.as_str()]);
    command
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn dialog_command(title: &str, message: &str, default: &str) -> Command {
    let mut command = Command::new("zenity");
    command.args([
        "--entry".to_string(),
        format!("--title={title}"),
        format!("--text={message}"),
        format!("--entry-text={default}"),
    ]);
    command
}
