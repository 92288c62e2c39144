//! Named commands sent by window content to the coordinator.
//!
//! Content invokes a command by name with an optional JSON payload;
//! [`Command::parse`] turns that pair into a typed [`Command`]. The names
//! are also the event channels the coordinator uses when it relays a
//! command to other windows.
//!
//! | name | payload | effect |
//! |---|---|---|
//! | `change-overlay-speed`, `change-play-status`, `change-overlay-image`, `change-interval`, `change-pause`, `setup-timers` | anything | relayed unchanged to every overlay and the settings window |
//! | `change-overlay-opacity` | number | cached, then relayed to every overlay |
//! | `get-current-opacity` | none | replies with the cached opacity |
//! | `change-hotkey` | `{accelerator, displayLabel}` | re-registers the global shortcut |
//! | `minimize-settings-window`, `show-settings-window`, `close-app` | none | window control / quit |
//! | `open-keybind-dialog`, `close-keybind-dialog` | none | keybind dialog lifecycle |
//! | `log` | anything | printed by the coordinator |

use crate::error::Error;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

pub const CHANGE_OVERLAY_OPACITY: &str = "change-overlay-opacity";
pub const GET_CURRENT_OPACITY: &str = "get-current-opacity";
pub const CHANGE_HOTKEY: &str = "change-hotkey";
pub const MINIMIZE_SETTINGS_WINDOW: &str = "minimize-settings-window";
pub const SHOW_SETTINGS_WINDOW: &str = "show-settings-window";
pub const CLOSE_APP: &str = "close-app";
pub const OPEN_KEYBIND_DIALOG: &str = "open-keybind-dialog";
pub const CLOSE_KEYBIND_DIALOG: &str = "close-keybind-dialog";
pub const LOG: &str = "log";
/// Sent to the settings content when a newer release exists.
pub const UPDATE_AVAILABLE: &str = "update-available";

/// Commands relayed verbatim to every overlay (and the settings content).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ForwardChannel {
    OverlaySpeed,
    PlayStatus,
    OverlayImage,
    Interval,
    Pause,
    SetupTimers,
}

impl ForwardChannel {
    pub const ALL: [ForwardChannel; 6] = [
        ForwardChannel::OverlaySpeed,
        ForwardChannel::PlayStatus,
        ForwardChannel::OverlayImage,
        ForwardChannel::Interval,
        ForwardChannel::Pause,
        ForwardChannel::SetupTimers,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ForwardChannel::OverlaySpeed => "change-overlay-speed",
            ForwardChannel::PlayStatus => "change-play-status",
            ForwardChannel::OverlayImage => "change-overlay-image",
            ForwardChannel::Interval => "change-interval",
            ForwardChannel::Pause => "change-pause",
            ForwardChannel::SetupTimers => "setup-timers",
        }
    }
}

impl fmt::Display for ForwardChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ForwardChannel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ForwardChannel::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| Error::UnknownCommand(s.to_string()))
    }
}

/// A global shortcut as the content describes it: the accelerator the
/// runtime registers, plus a human-readable label for the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotkeyBinding {
    pub accelerator: String,
    pub display_label: String,
}

impl HotkeyBinding {
    pub fn new(accelerator: impl Into<String>, display_label: impl Into<String>) -> Self {
        Self {
            accelerator: accelerator.into(),
            display_label: display_label.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Forward { channel: ForwardChannel, payload: Value },
    ChangeOpacity(f64),
    GetCurrentOpacity,
    ChangeHotkey(HotkeyBinding),
    MinimizeSettingsWindow,
    ShowSettingsWindow,
    CloseApp,
    OpenKeybindDialog,
    CloseKeybindDialog,
    Log(Value),
}

impl Command {
    /// Build a command from its wire name and optional payload.
    pub fn parse(name: &str, payload: Option<Value>) -> Result<Self, Error> {
        let payload = payload.unwrap_or(Value::Null);
        let command = match name {
            CHANGE_OVERLAY_OPACITY => {
                let opacity = payload
                    .as_f64()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| Error::invalid_payload(name, "expected a number"))?;
                Command::ChangeOpacity(opacity)
            }
            GET_CURRENT_OPACITY => Command::GetCurrentOpacity,
            CHANGE_HOTKEY => {
                let binding: HotkeyBinding =
                    serde_json::from_value(payload).map_err(|e| Error::invalid_payload(name, e))?;
                if binding.accelerator.trim().is_empty() {
                    return Err(Error::invalid_payload(name, "empty accelerator"));
                }
                Command::ChangeHotkey(binding)
            }
            MINIMIZE_SETTINGS_WINDOW => Command::MinimizeSettingsWindow,
            SHOW_SETTINGS_WINDOW => Command::ShowSettingsWindow,
            CLOSE_APP => Command::CloseApp,
            OPEN_KEYBIND_DIALOG => Command::OpenKeybindDialog,
            CLOSE_KEYBIND_DIALOG => Command::CloseKeybindDialog,
            LOG => Command::Log(payload),
            other => Command::Forward {
                channel: other.parse()?,
                payload,
            },
        };
        Ok(command)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Command::Forward { channel, .. } => channel.as_str(),
            Command::ChangeOpacity(_) => CHANGE_OVERLAY_OPACITY,
            Command::GetCurrentOpacity => GET_CURRENT_OPACITY,
            Command::ChangeHotkey(_) => CHANGE_HOTKEY,
            Command::MinimizeSettingsWindow => MINIMIZE_SETTINGS_WINDOW,
            Command::ShowSettingsWindow => SHOW_SETTINGS_WINDOW,
            Command::CloseApp => CLOSE_APP,
            Command::OpenKeybindDialog => OPEN_KEYBIND_DIALOG,
            Command::CloseKeybindDialog => CLOSE_KEYBIND_DIALOG,
            Command::Log(_) => LOG,
        }
    }
}

/// Answer to a command. Serializes to `null` or to the bare number.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Reply {
    Opacity(f64),
    Done,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn every_forward_channel_round_trips_its_name() {
        for channel in ForwardChannel::ALL {
            let cmd = Command::parse(channel.as_str(), Some(json!([1, "a"]))).unwrap();
            assert_eq!(
                cmd,
                Command::Forward {
                    channel,
                    payload: json!([1, "a"])
                }
            );
            assert_eq!(cmd.name(), channel.as_str());
        }
    }

    #[test]
    fn forward_without_payload_carries_null() {
        let cmd = Command::parse("setup-timers", None).unwrap();
        assert_eq!(
            cmd,
            Command::Forward {
                channel: ForwardChannel::SetupTimers,
                payload: Value::Null
            }
        );
    }

    #[test]
    fn opacity_must_be_a_number() {
        assert_eq!(
            Command::parse(CHANGE_OVERLAY_OPACITY, Some(json!(50))).unwrap(),
            Command::ChangeOpacity(50.0)
        );
        let err = Command::parse(CHANGE_OVERLAY_OPACITY, Some(json!("50"))).unwrap_err();
        assert!(matches!(err, Error::InvalidPayload { .. }));
    }

    #[test]
    fn hotkey_payload_uses_camel_case() {
        let cmd = Command::parse(
            CHANGE_HOTKEY,
            Some(json!({ "accelerator": "Control+Shift+S", "displayLabel": "Ctrl + Shift + S" })),
        )
        .unwrap();
        assert_eq!(
            cmd,
            Command::ChangeHotkey(HotkeyBinding::new("Control+Shift+S", "Ctrl + Shift + S"))
        );
    }

    #[test]
    fn blank_accelerator_is_rejected() {
        let err = Command::parse(
            CHANGE_HOTKEY,
            Some(json!({ "accelerator": " ", "displayLabel": "" })),
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidPayload { .. }));
    }

    #[test]
    fn unknown_names_are_errors() {
        let err = Command::parse("format-disk", None).unwrap_err();
        assert!(matches!(err, Error::UnknownCommand(name) if name == "format-disk"));
    }

    #[test]
    fn replies_serialize_as_bare_values() {
        assert_eq!(serde_json::to_value(Reply::Done).unwrap(), Value::Null);
        assert_eq!(serde_json::to_value(Reply::Opacity(50.0)).unwrap(), json!(50.0));
    }
}
