//! Creation, visibility and teardown of the three window kinds.

use log::{debug, error, info, warn};

use crate::display::Display;
use crate::error::Error;
use crate::host::{ShortcutRegistry, WindowHost};
use crate::lifecycle::{CloseDecision, SettingsWindow};
use crate::window::{WindowLabel, WindowSpec};

use super::{Coordinator, OverlayWindow};

impl<H: WindowHost + ShortcutRegistry> Coordinator<H> {
    /// Builds a click-through overlay covering `display` and adds it to the
    /// overlay collection.
    pub fn create_overlay(&mut self, display: &Display) -> Result<WindowLabel, Error> {
        if self.state.quitting {
            return Err(Error::Quitting);
        }
        let label = WindowLabel::overlay(self.state.next_overlay);
        self.state.next_overlay += 1;

        let bounds = display.overlay_bounds(self.config.overlay_height_trim);
        let spec = WindowSpec::overlay(label.clone(), bounds);
        let address = self.address_of(spec.entry);
        self.host.create_window(&spec, &address).map_err(Error::host)?;

        info!(
            "overlay {} created on display {} at ({}, {}) {}x{}",
            label, display.id, bounds.x, bounds.y, bounds.width, bounds.height
        );
        self.state.overlays.push(OverlayWindow {
            label: label.clone(),
            display_id: display.id.clone(),
        });
        Ok(label)
    }

    /// Builds the hidden settings window. A failure is logged and leaves
    /// the slot empty, so the next activation tries again. Once quitting,
    /// a destroyed settings window stays gone.
    pub fn create_settings(&mut self) {
        if self.state.quitting {
            debug!("quitting, not recreating settings window");
            return;
        }
        if self.state.settings.is_some() {
            debug!("settings window already exists");
            return;
        }
        let spec = WindowSpec::settings();
        let address = self.address_of(spec.entry);
        match self.host.create_window(&spec, &address) {
            Ok(()) => {
                info!("settings window created");
                self.state.settings = Some(SettingsWindow::new(spec.label));
            }
            Err(e) => error!("failed to create settings window: {}", e),
        }
    }

    /// Shows and focuses the settings window, creating it if it is gone.
    ///
    /// A freshly created window stays hidden; its content asks to be shown
    /// once it has rendered.
    pub fn show_settings(&mut self) {
        match self.settings_label() {
            Some(label) => self.reveal_settings(&label),
            None => self.create_settings(),
        }
    }

    /// OS-level "bring the app forward".
    pub fn activate(&mut self) {
        self.show_settings();
    }

    pub fn minimize_settings(&mut self) -> Result<(), Error> {
        if let Some(label) = self.settings_label() {
            self.host.minimize(&label).map_err(Error::host)?;
        }
        Ok(())
    }

    /// Opens the keybind dialog as a child of the settings window. Does
    /// nothing if a dialog is already open or there is no settings window.
    pub fn create_keybind_dialog(&mut self) -> Result<(), Error> {
        if self.state.quitting {
            debug!("quitting, not opening keybind dialog");
            return Ok(());
        }
        if self.state.keybind_dialog.is_some() {
            debug!("keybind dialog already open");
            return Ok(());
        }
        if self.state.settings.is_none() {
            debug!("no settings window to own the keybind dialog");
            return Ok(());
        }

        let primary = self.host.primary_display().unwrap_or_else(|e| {
            warn!("failed to query primary display: {}", e);
            None
        });
        let spec = WindowSpec::keybind_dialog(primary.as_ref());
        let address = self.address_of(spec.entry);
        self.host.create_window(&spec, &address).map_err(Error::host)?;

        info!("keybind dialog opened");
        self.state.keybind_dialog = Some(spec.label);
        Ok(())
    }

    pub fn close_keybind_dialog(&mut self) -> Result<(), Error> {
        if let Some(label) = self.state.keybind_dialog.take() {
            info!("keybind dialog closed");
            self.host.destroy(&label).map_err(Error::host)?;
        }
        Ok(())
    }

    /// Applies the close transition for `label` and carries it out.
    ///
    /// The settings window is only hidden unless the app is quitting;
    /// every other window is destroyed.
    pub fn on_close_requested(&mut self, label: &WindowLabel) -> CloseDecision {
        let quitting = self.state.quitting;
        let decision = match self.state.settings.as_mut() {
            Some(settings) if settings.label() == label => settings.close_requested(quitting),
            _ => CloseDecision::Destroy,
        };
        if self.state.keybind_dialog.as_ref() == Some(label) {
            self.state.keybind_dialog = None;
        }

        let result = match decision {
            CloseDecision::Hide => self.host.hide(label),
            CloseDecision::Destroy => self.host.destroy(label),
        };
        if let Err(e) = result {
            warn!("failed to {:?} window {}: {}", decision, label, e);
        }
        decision
    }

    /// Drops every reference to a window that no longer exists.
    pub fn on_window_destroyed(&mut self, label: &WindowLabel) {
        let before = self.state.overlays.len();
        self.state.overlays.retain(|overlay| &overlay.label != label);
        if self.state.overlays.len() != before {
            info!(
                "overlay {} closed, {} remaining",
                label,
                self.state.overlays.len()
            );
            return;
        }

        if self
            .state
            .settings
            .as_ref()
            .is_some_and(|settings| settings.label() == label)
        {
            info!("settings window destroyed");
            self.state.settings = None;
        } else if self.state.keybind_dialog.as_ref() == Some(label) {
            self.state.keybind_dialog = None;
        }
    }

    pub fn reassert_always_on_top(&mut self) {
        for overlay in &self.state.overlays {
            if let Err(e) = self.host.set_always_on_top(&overlay.label) {
                debug!("always-on-top for {} failed: {}", overlay.label, e);
            }
        }
    }

    pub(super) fn settings_label(&self) -> Option<WindowLabel> {
        self.state.settings.as_ref().map(|s| s.label().clone())
    }

    pub(super) fn reveal_settings(&mut self, label: &WindowLabel) {
        if self.state.quitting {
            debug!("quitting, leaving settings window as it is");
            return;
        }
        if let Err(e) = self.host.show(label) {
            warn!("failed to show settings window: {}", e);
            return;
        }
        if let Err(e) = self.host.focus(label) {
            warn!("failed to focus settings window: {}", e);
        }
        if let Some(settings) = self.state.settings.as_mut() {
            settings.mark_shown();
        }
    }

    pub(super) fn conceal_settings(&mut self, label: &WindowLabel) {
        if let Err(e) = self.host.hide(label) {
            warn!("failed to hide settings window: {}", e);
            return;
        }
        if let Some(settings) = self.state.settings.as_mut() {
            settings.mark_hidden();
        }
    }
}
