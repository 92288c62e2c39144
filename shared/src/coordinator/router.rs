//! Named-command dispatch.
//!
//! Broadcasts are fire-and-forget: each target gets the message at most
//! once, in collection order, with no acknowledgement and no
//! backpressure. Nothing orders two commands from different windows
//! beyond the order they reach the coordinator.

use log::{debug, info, warn};
use serde_json::{json, Value};

use crate::command::{Command, Reply, CHANGE_OVERLAY_OPACITY};
use crate::error::Error;
use crate::host::{ShortcutRegistry, WindowHost};

use super::Coordinator;

/// Who besides the overlays receives a broadcast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Audience {
    Overlays,
    OverlaysAndSettings,
}

impl<H: WindowHost + ShortcutRegistry> Coordinator<H> {
    /// Runs one command and returns its answer.
    pub fn dispatch(&mut self, command: Command) -> Result<Reply, Error> {
        match command {
            Command::Forward { channel, payload } => {
                self.broadcast(channel.as_str(), &payload, Audience::OverlaysAndSettings);
            }
            Command::ChangeOpacity(opacity) => {
                self.state.current_opacity = opacity;
                self.broadcast(CHANGE_OVERLAY_OPACITY, &json!(opacity), Audience::Overlays);
            }
            Command::GetCurrentOpacity => return Ok(Reply::Opacity(self.state.current_opacity)),
            Command::ChangeHotkey(binding) => self.change_hotkey(binding)?,
            Command::MinimizeSettingsWindow => self.minimize_settings()?,
            Command::ShowSettingsWindow => self.show_settings(),
            Command::CloseApp => self.quit(),
            Command::OpenKeybindDialog => self.create_keybind_dialog()?,
            Command::CloseKeybindDialog => self.close_keybind_dialog()?,
            Command::Log(value) => info!(target: "content", "{}", value),
        }
        Ok(Reply::Done)
    }

    /// Sends `payload` on `channel` to every live overlay, then to the
    /// settings content if the audience includes it. Returns how many
    /// windows accepted the message.
    pub(super) fn broadcast(&mut self, channel: &str, payload: &Value, audience: Audience) -> usize {
        let mut delivered = 0;
        for overlay in &self.state.overlays {
            match self.host.send(&overlay.label, channel, payload) {
                Ok(()) => delivered += 1,
                Err(e) => warn!("{} not delivered to {}: {}", channel, overlay.label, e),
            }
        }

        if audience == Audience::OverlaysAndSettings {
            if let Some(settings) = &self.state.settings {
                match self.host.send(settings.label(), channel, payload) {
                    Ok(()) => delivered += 1,
                    Err(e) => warn!("{} not delivered to settings: {}", channel, e),
                }
            }
        }

        debug!("{} delivered to {} window(s)", channel, delivered);
        delivered
    }
}
