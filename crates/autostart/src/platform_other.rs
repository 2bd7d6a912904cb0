//! Platforms without an autostart mechanism.

use crate::{Autostart, AutostartApp, Unavailable};

pub(crate) fn backend(_app: AutostartApp) -> Box<dyn Autostart> {
    Box::new(Unavailable {
        reason: "unsupported platform",
    })
}
