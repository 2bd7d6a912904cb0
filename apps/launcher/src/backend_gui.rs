//! Native tray backend (`tray-icon` + `tao`).
//!
//! The tray icon is created once the event loop has started, as macOS
//! requires. Menu clicks go to the [`TrayController`]; [`TrayUpdate`]s from
//! the supervisor are applied on every wake-up.

use std::time::{Duration, Instant};

use npc_launcher_tray::{Dispatch, MenuAction, MenuState, TrayController, TrayUpdate, TrayUpdates};
use tao::event::{Event, StartCause};
use tao::event_loop::{ControlFlow, EventLoopBuilder};
use tao::platform::run_return::EventLoopExtRunReturn;
use tokio_util::sync::CancellationToken;
use tray_icon::menu::{CheckMenuItem, Menu, MenuEvent, MenuItem, PredefinedMenuItem};
use tray_icon::{Icon, TrayIcon, TrayIconBuilder};

use crate::icon;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// The live tray icon plus the one menu item that changes at runtime.
struct NativeTray {
    icon: TrayIcon,
    autostart: Option<CheckMenuItem>,
}

fn build_tray(state: &MenuState) -> anyhow::Result<NativeTray> {
    let menu = Menu::new();
    let mut autostart = None;

    for item in state.build_menu() {
        if item.is_separator() {
            menu.append(&PredefinedMenuItem::separator())?;
            continue;
        }
        let id = item.action.map(|a| a.id()).unwrap_or_default();
        match item.checked {
            Some(checked) => {
                let check = CheckMenuItem::with_id(id, &item.label, item.enabled, checked, None);
                menu.append(&check)?;
                if item.action == Some(MenuAction::ToggleAutostart) {
                    autostart = Some(check);
                }
            }
            None => {
                menu.append(&MenuItem::with_id(id, &item.label, item.enabled, None))?;
            }
        }
    }

    let icon = Icon::from_rgba(icon::rgba(), icon::SIZE, icon::SIZE)?;
    let icon = TrayIconBuilder::new()
        .with_menu(Box::new(menu))
        .with_tooltip(state.tooltip())
        .with_title(&state.title)
        .with_icon(icon)
        .build()?;

    Ok(NativeTray { icon, autostart })
}

pub fn run(
    mut controller: TrayController,
    updates: TrayUpdates,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let mut event_loop = EventLoopBuilder::new().build();
    let menu_rx = MenuEvent::receiver();
    let mut tray: Option<NativeTray> = None;
    let mut failure: Option<anyhow::Error> = None;

    event_loop.run_return(|event, _, control_flow| {
        *control_flow = ControlFlow::WaitUntil(Instant::now() + POLL_INTERVAL);

        if let Event::NewEvents(StartCause::Init) = event {
            match build_tray(controller.state()) {
                Ok(native) => tray = Some(native),
                Err(e) => {
                    failure = Some(e);
                    *control_flow = ControlFlow::Exit;
                    return;
                }
            }
        }

        while let Ok(event) = menu_rx.try_recv() {
            let Some(action) = MenuAction::from_id(event.id.0.as_str()) else {
                continue;
            };
            if controller.handle(action) == Dispatch::Quit {
                *control_flow = ControlFlow::Exit;
            }
        }

        for update in updates.drain() {
            match update {
                TrayUpdate::Tooltip(text) => {
                    if let Some(native) = &tray
                        && let Err(e) = native.icon.set_tooltip(Some(text))
                    {
                        tracing::warn!(error = %e, "failed to update tray tooltip");
                    }
                }
                TrayUpdate::AutostartChecked(checked) => {
                    if let Some(item) = tray.as_ref().and_then(|t| t.autostart.as_ref()) {
                        item.set_checked(checked);
                    }
                }
                TrayUpdate::Shutdown => *control_flow = ControlFlow::Exit,
            }
        }

        if cancel.is_cancelled() {
            *control_flow = ControlFlow::Exit;
        }
    });

    // Dropping the icon removes it from the tray.
    drop(tray);

    match failure {
        Some(e) => Err(e.context("failed to create tray icon")),
        None => Ok(()),
    }
}
