//! `HKCU\...\Run` registry values, managed through `reg.exe`.

use std::os::windows::process::CommandExt;
use std::process::{Command, Output};

use crate::{Autostart, AutostartApp, AutostartError};

const RUN_KEY: &str = r"HKCU\Software\Microsoft\Windows\CurrentVersion\Run";
const CREATE_NO_WINDOW: u32 = 0x0800_0000;

pub(crate) fn backend(app: AutostartApp) -> Box<dyn Autostart> {
    Box::new(RunKey { app })
}

struct RunKey {
    app: AutostartApp,
}

fn reg(args: &[&str]) -> Result<Output, AutostartError> {
    Ok(Command::new("reg")
        .args(args)
        .creation_flags(CREATE_NO_WINDOW)
        .output()?)
}

/// Quotes one argument so `CommandLineToArgvW` reads it back unchanged.
fn quote_arg(arg: &str) -> String {
    let mut out = String::from('"');
    let mut backslashes = 0;
    for c in arg.chars() {
        if c == '\\' {
            backslashes += 1;
            continue;
        }
        if c == '"' {
            backslashes = backslashes * 2 + 1;
        }
        out.extend(std::iter::repeat_n('\\', backslashes));
        backslashes = 0;
        out.push(c);
    }
    // Backslashes before the closing quote are doubled.
    out.extend(std::iter::repeat_n('\\', backslashes * 2));
    out.push('"');
    out
}

fn command_line(exec: &[String]) -> String {
    exec.iter()
        .map(|arg| quote_arg(arg))
        .collect::<Vec<_>>()
        .join(" ")
}

fn check(output: Output) -> Result<(), AutostartError> {
    if output.status.success() {
        Ok(())
    } else {
        Err(AutostartError::Command(
            String::from_utf8_lossy(&output.stderr).trim().to_string(),
        ))
    }
}

impl Autostart for RunKey {
    fn is_enabled(&self) -> bool {
        reg(&["query", RUN_KEY, "/v", &self.app.name]).is_ok_and(|out| out.status.success())
    }

    fn enable(&self) -> Result<(), AutostartError> {
        let value = command_line(&self.app.exec);
        check(reg(&[
            "add", RUN_KEY, "/v", &self.app.name, "/t", "REG_SZ", "/d", &value, "/f",
        ])?)?;
        tracing::info!(name = %self.app.name, "autostart enabled");
        Ok(())
    }

    fn disable(&self) -> Result<(), AutostartError> {
        if !self.is_enabled() {
            return Ok(());
        }
        check(reg(&["delete", RUN_KEY, "/v", &self.app.name, "/f"])?)?;
        tracing::info!(name = %self.app.name, "autostart disabled");
        Ok(())
    }
}
