//! Hide-instead-of-close lifecycle of the settings window.
//!
//! The settings window lives for the whole process. A close request only
//! hides it, unless the application is quitting, in which case the close
//! goes through and the window is destroyed for good.

use crate::window::WindowLabel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsPhase {
    /// Shown on screen (possibly minimized).
    Active,
    Hidden,
}

/// What the host must do with a window whose close was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseDecision {
    Hide,
    Destroy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsWindow {
    label: WindowLabel,
    phase: SettingsPhase,
}

impl SettingsWindow {
    /// A freshly built settings window is hidden until its content asks
    /// to be shown.
    pub fn new(label: WindowLabel) -> Self {
        Self {
            label,
            phase: SettingsPhase::Hidden,
        }
    }

    pub fn label(&self) -> &WindowLabel {
        &self.label
    }

    pub fn phase(&self) -> SettingsPhase {
        self.phase
    }

    pub fn mark_shown(&mut self) {
        self.phase = SettingsPhase::Active;
    }

    pub fn mark_hidden(&mut self) {
        self.phase = SettingsPhase::Hidden;
    }

    /// Transition for a close request.
    pub fn close_requested(&mut self, quitting: bool) -> CloseDecision {
        if quitting {
            CloseDecision::Destroy
        } else {
            self.phase = SettingsPhase::Hidden;
            CloseDecision::Hide
        }
    }
}
