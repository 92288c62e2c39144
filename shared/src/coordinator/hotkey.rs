//! The one global shortcut that toggles the settings window.

use log::{debug, info, warn};
use serde_json::json;

use crate::command::{HotkeyBinding, CHANGE_HOTKEY};
use crate::error::Error;
use crate::host::{ShortcutRegistry, WindowHost};

use super::Coordinator;

impl<H: WindowHost + ShortcutRegistry> Coordinator<H> {
    /// Replaces the current binding: the old accelerator is unregistered
    /// before the new one is registered.
    ///
    /// If the new accelerator is refused, the old one is registered again
    /// and the error is returned; the settings content is not told about a
    /// binding that never took effect.
    pub fn change_hotkey(&mut self, binding: HotkeyBinding) -> Result<(), Error> {
        let previous = self.state.hotkey.take();
        if let Some(prev) = &previous {
            if let Err(e) = self.host.unregister(&prev.accelerator) {
                warn!("failed to unregister hotkey {}: {}", prev.accelerator, e);
            }
        }

        if let Err(e) = self.host.register(&binding.accelerator) {
            self.state.hotkey = self.restore_hotkey(previous);
            return Err(Error::HotkeyRejected {
                accelerator: binding.accelerator,
                source: Box::new(e),
            });
        }

        info!(
            "hotkey set to {} ({})",
            binding.accelerator, binding.display_label
        );
        if let Some(label) = self.settings_label() {
            let payload = json!({
                "accelerator": binding.accelerator,
                "displayLabel": binding.display_label,
            });
            if let Err(e) = self.host.send(&label, CHANGE_HOTKEY, &payload) {
                warn!("failed to notify settings of new hotkey: {}", e);
            }
        }
        self.state.hotkey = Some(binding);
        Ok(())
    }

    fn restore_hotkey(&mut self, previous: Option<HotkeyBinding>) -> Option<HotkeyBinding> {
        let prev = previous?;
        match self.host.register(&prev.accelerator) {
            Ok(()) => {
                info!("kept previous hotkey {}", prev.accelerator);
                Some(prev)
            }
            Err(e) => {
                warn!("could not restore hotkey {}: {}", prev.accelerator, e);
                None
            }
        }
    }

    /// Shows and focuses the settings window if it is hidden, hides it if
    /// it is visible. Presses of anything but the current binding are
    /// ignored.
    pub fn on_hotkey_pressed(&mut self, accelerator: &str) {
        let bound = self
            .state
            .hotkey
            .as_ref()
            .is_some_and(|b| b.accelerator == accelerator);
        if !bound {
            debug!("ignoring press of unbound hotkey {}", accelerator);
            return;
        }

        let Some(label) = self.settings_label() else {
            return;
        };
        let visible = self.host.is_visible(&label).unwrap_or_else(|e| {
            warn!("failed to query settings visibility: {}", e);
            false
        });
        if visible {
            self.conceal_settings(&label);
        } else {
            self.reveal_settings(&label);
        }
    }
}
