//! System tray for the npc launcher.
//!
//! Provides the tray's menu model, the controller that handles menu
//! actions, and the channel the rest of the launcher uses to update the
//! tray:
//! - [`MenuAction`]: what the user clicked, dispatched by [`TrayController`]
//! - [`TrayUpdate`]: changes pushed to the tray (tooltip, checkbox, shutdown)
//!
//! # Platform notes
//! - The GUI backend (tray icon and native menu) lives in the launcher
//!   binary; everything here is backend independent.
//! - The tray event loop must run on the main thread on some platforms, so
//!   the controller is synchronous and owned by that thread.

mod controller;
mod menu;
mod prompt;
mod tray;

pub use controller::{Dispatch, EDIT_CONFIG_HINT, EDIT_CONFIG_TITLE, TrayController};
pub use menu::{MenuAction, MenuItem, MenuState, tooltip_text};
pub use prompt::{ConfigPrompt, SystemPrompt};
pub use tray::{TrayConfig, TrayHandle, TrayUpdate, TrayUpdates, channel};
