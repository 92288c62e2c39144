//! The tray icon and what its menu entries do.

use log::{error, info};

use crate::host::{ShortcutRegistry, TrayMenuItem, WindowHost, TRAY_TOOLTIP};

use super::Coordinator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayEvent {
    Menu(TrayMenuItem),
    /// Left click on the icon itself.
    IconClicked,
}

impl<H: WindowHost + ShortcutRegistry> Coordinator<H> {
    pub(super) fn create_tray(&mut self) {
        if self.state.tray {
            return;
        }
        match self.host.create_tray(TRAY_TOOLTIP, &TrayMenuItem::ALL) {
            Ok(()) => {
                info!("tray icon created");
                self.state.tray = true;
            }
            Err(e) => error!("failed to create tray icon: {}", e),
        }
    }

    /// "Show Settings" and a click on the icon behave like activation:
    /// the settings window is recreated if it is gone.
    pub fn on_tray_event(&mut self, event: TrayEvent) {
        match event {
            TrayEvent::Menu(TrayMenuItem::ShowSettings) | TrayEvent::IconClicked => {
                self.show_settings()
            }
            TrayEvent::Menu(TrayMenuItem::Quit) => self.quit(),
        }
    }
}
