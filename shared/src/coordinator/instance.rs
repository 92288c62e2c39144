//! Handling of launches turned away by the single-instance lock.

use log::{debug, info, warn};

use crate::host::{ShortcutRegistry, WindowHost};

use super::Coordinator;

impl<H: WindowHost + ShortcutRegistry> Coordinator<H> {
    /// A second launch was turned away by the single-instance lock; bring
    /// this instance's settings window forward instead.
    pub fn on_second_instance(&mut self) {
        if self.state.quitting {
            debug!("second instance launched while quitting");
            return;
        }
        let Some(label) = self.settings_label() else {
            debug!("second instance launched before settings window exists");
            return;
        };
        info!("second instance launched, focusing settings");
        match self.host.is_minimized(&label) {
            Ok(true) => {
                if let Err(e) = self.host.unminimize(&label) {
                    warn!("failed to restore settings window: {}", e);
                }
            }
            Ok(false) => {}
            Err(e) => warn!("failed to query settings window state: {}", e),
        }
        self.reveal_settings(&label);
    }
}
