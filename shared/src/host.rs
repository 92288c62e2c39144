//! Traits that decouple the coordinator from the GUI runtime.
//!
//! The Tauri shell implements both traits on one type; tests implement
//! them with an in-memory recorder. The
//! [`Coordinator`](crate::coordinator::Coordinator) only depends on these
//! abstractions.

use crate::display::Display;
use crate::window::{LoadAddress, WindowLabel, WindowSpec};
use serde_json::Value;

/// Entries of the tray context menu, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayMenuItem {
    ShowSettings,
    Quit,
}

impl TrayMenuItem {
    pub const ALL: [TrayMenuItem; 2] = [TrayMenuItem::ShowSettings, TrayMenuItem::Quit];

    pub fn id(self) -> &'static str {
        match self {
            TrayMenuItem::ShowSettings => "show-settings",
            TrayMenuItem::Quit => "quit",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TrayMenuItem::ShowSettings => "Show Settings",
            TrayMenuItem::Quit => "Quit",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|item| item.id() == id)
    }
}

pub const TRAY_TOOLTIP: &str = "Visual Snow Relief Overlay";

/// Abstraction over the windowing runtime.
///
/// Windows are addressed by label. Operations on a label the host does not
/// know should fail with `Self::Error`; the coordinator decides whether
/// that matters.
pub trait WindowHost {
    type Error: std::error::Error + Send + Sync + 'static;

    /// All displays currently attached, in the order the OS reports them.
    fn displays(&self) -> Result<Vec<Display>, Self::Error>;

    fn primary_display(&self) -> Result<Option<Display>, Self::Error>;

    /// Build a window from `spec` and start loading `address` in it.
    fn create_window(&mut self, spec: &WindowSpec, address: &LoadAddress)
        -> Result<(), Self::Error>;

    fn show(&mut self, label: &WindowLabel) -> Result<(), Self::Error>;
    fn hide(&mut self, label: &WindowLabel) -> Result<(), Self::Error>;
    fn focus(&mut self, label: &WindowLabel) -> Result<(), Self::Error>;
    fn minimize(&mut self, label: &WindowLabel) -> Result<(), Self::Error>;
    fn unminimize(&mut self, label: &WindowLabel) -> Result<(), Self::Error>;
    fn is_visible(&self, label: &WindowLabel) -> Result<bool, Self::Error>;
    fn is_minimized(&self, label: &WindowLabel) -> Result<bool, Self::Error>;

    /// Tear the native window down without asking anyone. The host reports
    /// the destruction back as an event once it has happened.
    fn destroy(&mut self, label: &WindowLabel) -> Result<(), Self::Error>;

    fn set_always_on_top(&mut self, label: &WindowLabel) -> Result<(), Self::Error>;

    /// Deliver `payload` on `channel` to the content of one window.
    /// Fire-and-forget: no acknowledgement is expected.
    fn send(&mut self, label: &WindowLabel, channel: &str, payload: &Value)
        -> Result<(), Self::Error>;

    fn create_tray(&mut self, tooltip: &str, items: &[TrayMenuItem]) -> Result<(), Self::Error>;

    /// Kick off a background update check. Must not block.
    fn check_for_updates(&mut self);

    /// Terminate the application.
    fn quit(&mut self);
}

/// Registration of process-wide keyboard shortcuts.
///
/// Presses are reported back to the coordinator as events carrying the
/// same accelerator string that was registered.
pub trait ShortcutRegistry {
    type Error: std::error::Error + Send + Sync + 'static;

    fn register(&mut self, accelerator: &str) -> Result<(), Self::Error>;
    fn unregister(&mut self, accelerator: &str) -> Result<(), Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tray_items_resolve_from_their_ids() {
        for item in TrayMenuItem::ALL {
            assert_eq!(TrayMenuItem::from_id(item.id()), Some(item));
        }
        assert_eq!(TrayMenuItem::from_id("toggle"), None);
    }
}
