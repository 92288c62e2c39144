//! Window descriptions handed to the [`WindowHost`](crate::host::WindowHost).
//!
//! The coordinator never holds native handles. Every window is addressed by
//! its [`WindowLabel`], and created from a [`WindowSpec`] that carries all
//! the flags the host has to apply.

use crate::display::{Display, Rect, Size};
use std::fmt;

pub const SETTINGS_LABEL: &str = "settings";
pub const KEYBIND_DIALOG_LABEL: &str = "keybind-dialog";
const OVERLAY_LABEL_PREFIX: &str = "overlay-";

pub const SETTINGS_SIZE: Size = Size {
    width: 602,
    height: 604,
};
pub const KEYBIND_DIALOG_SIZE: Size = Size {
    width: 300,
    height: 150,
};
/// Distance of the keybind dialog from the right and top edges of the
/// primary display.
pub const KEYBIND_DIALOG_MARGIN: i32 = 100;

/// Unique name of a window inside the process.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WindowLabel(String);

impl WindowLabel {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn settings() -> Self {
        Self::new(SETTINGS_LABEL)
    }

    pub fn keybind_dialog() -> Self {
        Self::new(KEYBIND_DIALOG_LABEL)
    }

    pub fn overlay(index: usize) -> Self {
        Self(format!("{OVERLAY_LABEL_PREFIX}{index}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_overlay(&self) -> bool {
        self.0.starts_with(OVERLAY_LABEL_PREFIX)
    }
}

impl fmt::Display for WindowLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WindowLabel {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Stacking band a window is kept in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowLevel {
    /// Whatever `always_on_top` gives on the platform.
    Normal,
    /// Above full-screen apps and the menu bar, where the platform has such
    /// a band.
    ScreenSaver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowKind {
    Overlay,
    Settings,
    KeybindDialog,
}

/// The HTML entry point a window loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryPoint {
    Overlay,
    Settings,
    KeybindDialog,
}

impl EntryPoint {
    pub fn file_name(self) -> &'static str {
        match self {
            EntryPoint::Overlay => "overlay.html",
            EntryPoint::Settings => "index.html",
            EntryPoint::KeybindDialog => "keybind_dialog.html",
        }
    }

    /// Where the window should load this entry from: the bundled pages
    /// served over the app-private scheme, or a development server.
    pub fn address(self, dev_server: Option<&str>) -> LoadAddress {
        match dev_server {
            Some(base) => {
                let sep = if base.ends_with('/') { "" } else { "/" };
                LoadAddress::External(format!("{base}{sep}{}", self.file_name()))
            }
            None => LoadAddress::App(self.file_name().to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadAddress {
    /// Path relative to the bundled frontend, served by the app scheme.
    App(String),
    /// Absolute URL (development server).
    External(String),
}

/// Everything the host needs to build one window.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowSpec {
    pub label: WindowLabel,
    pub kind: WindowKind,
    pub entry: EntryPoint,
    pub title: &'static str,
    /// `None` lets the host center the window.
    pub position: Option<(i32, i32)>,
    pub size: Size,
    pub decorations: bool,
    pub transparent: bool,
    pub shadow: bool,
    /// Mouse events pass through to whatever is underneath.
    pub click_through: bool,
    pub always_on_top: bool,
    pub level: WindowLevel,
    pub visible_on_all_workspaces: bool,
    pub skip_taskbar: bool,
    pub resizable: bool,
    pub visible: bool,
    pub focused: bool,
    pub parent: Option<WindowLabel>,
}

impl WindowSpec {
    /// Full-display, transparent, click-through overlay.
    pub fn overlay(label: WindowLabel, bounds: Rect) -> Self {
        Self {
            label,
            kind: WindowKind::Overlay,
            entry: EntryPoint::Overlay,
            title: "Snow Relief Overlay",
            position: Some((bounds.x, bounds.y)),
            size: Size {
                width: bounds.width,
                height: bounds.height,
            },
            decorations: false,
            transparent: true,
            shadow: false,
            click_through: true,
            always_on_top: true,
            level: WindowLevel::ScreenSaver,
            visible_on_all_workspaces: true,
            skip_taskbar: true,
            resizable: false,
            visible: true,
            focused: false,
            parent: None,
        }
    }

    /// The settings window starts hidden; its content asks to be shown
    /// once it has rendered.
    pub fn settings() -> Self {
        Self {
            label: WindowLabel::settings(),
            kind: WindowKind::Settings,
            entry: EntryPoint::Settings,
            title: "Snow Relief",
            position: None,
            size: SETTINGS_SIZE,
            decorations: false,
            transparent: false,
            shadow: true,
            click_through: false,
            always_on_top: true,
            level: WindowLevel::Normal,
            visible_on_all_workspaces: false,
            skip_taskbar: true,
            resizable: false,
            visible: false,
            focused: false,
            parent: None,
        }
    }

    /// Framed, always-on-top child of the settings window, placed near the
    /// top-right corner of the primary display.
    pub fn keybind_dialog(primary: Option<&Display>) -> Self {
        let position = primary.map(|d| {
            (
                d.size.width as i32 - KEYBIND_DIALOG_SIZE.width as i32 - KEYBIND_DIALOG_MARGIN,
                KEYBIND_DIALOG_MARGIN,
            )
        });
        Self {
            label: WindowLabel::keybind_dialog(),
            kind: WindowKind::KeybindDialog,
            entry: EntryPoint::KeybindDialog,
            title: "Set Hotkey",
            position,
            size: KEYBIND_DIALOG_SIZE,
            decorations: true,
            transparent: false,
            shadow: true,
            click_through: false,
            always_on_top: true,
            level: WindowLevel::Normal,
            visible_on_all_workspaces: false,
            skip_taskbar: false,
            resizable: false,
            visible: true,
            focused: true,
            parent: Some(WindowLabel::settings()),
        }
    }
}
