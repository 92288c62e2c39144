//! The single-threaded coordinator that owns all window and session state.
//!
//! [`Coordinator`] is generic over the GUI runtime (see [`crate::host`]).
//! Every native callback is turned into an [`AppEvent`] and fed to
//! [`Coordinator::handle`] through one channel, so handlers never overlap
//! and no state needs locking. [`run_event_loop`] is that loop.
//!
//! The behaviour is spread over a few files, one per concern:
//!
//! * `windows`: creation, show/hide and teardown of the overlay,
//!   settings and keybind-dialog windows
//! * `router`: the named-command dispatch and broadcast fan-out
//! * `hotkey`: the single global shortcut that toggles settings
//! * `instance`: refocusing when a second instance is launched
//! * `tray`: the tray icon and its menu

mod hotkey;
mod instance;
mod router;
mod tray;
mod windows;


pub use tray::TrayEvent;

use crate::command::{Command, HotkeyBinding, Reply};
use crate::config::AppConfig;
use crate::error::Error;
use crate::host::{ShortcutRegistry, WindowHost};
use crate::lifecycle::SettingsWindow;
use crate::window::{EntryPoint, LoadAddress, WindowLabel};
use log::{debug, error, info, warn};
use std::sync::mpsc;

/// Where the answer to an [`AppEvent::Invoke`] goes.
pub type ReplySender = mpsc::Sender<Result<Reply, Error>>;

/// Everything the coordinator reacts to.
#[derive(Debug)]
pub enum AppEvent {
    /// Enumerate displays and build the initial windows and tray.
    Startup,
    /// A command from window content. `reply` is answered once the command
    /// has been fully handled.
    Invoke {
        command: Command,
        reply: Option<ReplySender>,
    },
    /// The user or the OS asked to close a window. The native close has
    /// already been vetoed; the coordinator decides what happens.
    CloseRequested(WindowLabel),
    /// A native window is gone.
    Destroyed(WindowLabel),
    /// The OS asked the app to come forward (macOS dock click).
    Activate,
    /// Another copy of the program was launched.
    SecondInstance,
    Tray(TrayEvent),
    /// A registered global shortcut was pressed.
    HotkeyPressed(String),
    /// The last window closed.
    AllWindowsClosed,
    /// Periodic tick to re-assert always-on-top on every overlay.
    ReassertTopmost,
}

/// An overlay window and the display it covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayWindow {
    pub label: WindowLabel,
    pub display_id: String,
}

/// Process-wide state. Only the coordinator's handlers mutate it.
#[derive(Debug)]
struct AppState {
    overlays: Vec<OverlayWindow>,
    next_overlay: usize,
    settings: Option<SettingsWindow>,
    keybind_dialog: Option<WindowLabel>,
    tray: bool,
    /// Set before any path that must really tear windows down.
    quitting: bool,
    /// Last opacity sent to the overlays, for windows that ask later.
    current_opacity: f64,
    hotkey: Option<HotkeyBinding>,
}

impl AppState {
    fn new(initial_opacity: f64) -> Self {
        Self {
            overlays: Vec::new(),
            next_overlay: 0,
            settings: None,
            keybind_dialog: None,
            tray: false,
            quitting: false,
            current_opacity: initial_opacity,
            hotkey: None,
        }
    }
}

/// Owns the application state and drives the [`WindowHost`].
pub struct Coordinator<H> {
    host: H,
    config: AppConfig,
    state: AppState,
}

impl<H: WindowHost + ShortcutRegistry> Coordinator<H> {
    pub fn new(host: H, config: AppConfig) -> Self {
        let state = AppState::new(config.initial_opacity);
        Self {
            host,
            config,
            state,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn overlays(&self) -> &[OverlayWindow] {
        &self.state.overlays
    }

    pub fn settings(&self) -> Option<&SettingsWindow> {
        self.state.settings.as_ref()
    }

    pub fn keybind_dialog(&self) -> Option<&WindowLabel> {
        self.state.keybind_dialog.as_ref()
    }

    pub fn has_tray(&self) -> bool {
        self.state.tray
    }

    pub fn is_quitting(&self) -> bool {
        self.state.quitting
    }

    pub fn current_opacity(&self) -> f64 {
        self.state.current_opacity
    }

    pub fn current_hotkey(&self) -> Option<&HotkeyBinding> {
        self.state.hotkey.as_ref()
    }

    /// Handle one event to completion.
    pub fn handle(&mut self, event: AppEvent) {
        debug!("event: {:?}", event);
        match event {
            AppEvent::Startup => self.startup(),
            AppEvent::Invoke { command, reply } => {
                let name = command.name();
                let result = self.dispatch(command);
                if let Err(e) = &result {
                    warn!("{} failed: {}", name, e);
                }
                if let Some(reply) = reply {
                    // The caller may have given up waiting.
                    let _ = reply.send(result);
                }
            }
            AppEvent::CloseRequested(label) => {
                self.on_close_requested(&label);
            }
            AppEvent::Destroyed(label) => self.on_window_destroyed(&label),
            AppEvent::Activate => self.activate(),
            AppEvent::SecondInstance => self.on_second_instance(),
            AppEvent::Tray(event) => self.on_tray_event(event),
            AppEvent::HotkeyPressed(accelerator) => self.on_hotkey_pressed(&accelerator),
            AppEvent::AllWindowsClosed => self.quit(),
            AppEvent::ReassertTopmost => self.reassert_always_on_top(),
        }
    }

    /// One overlay per display, then the hidden settings window, then the
    /// tray, then a background update check. Overlays are created one
    /// after another.
    pub fn startup(&mut self) {
        match self.host.displays() {
            Ok(displays) => {
                info!("found {} display(s)", displays.len());
                for display in &displays {
                    if let Err(e) = self.create_overlay(display) {
                        error!("failed to create overlay on display {}: {}", display.id, e);
                    }
                }
            }
            Err(e) => error!("failed to enumerate displays: {}", e),
        }

        self.create_settings();
        self.create_tray();

        if self.config.check_for_updates {
            self.host.check_for_updates();
        }
    }

    /// Set the quitting flag, then terminate. Later calls do nothing.
    pub fn quit(&mut self) {
        if self.state.quitting {
            debug!("already quitting");
            return;
        }
        info!("quitting");
        self.state.quitting = true;
        self.host.quit();
    }

    fn address_of(&self, entry: EntryPoint) -> LoadAddress {
        entry.address(self.config.dev_server_url.as_deref())
    }
}

/// Process events until every sender is gone, then hand the coordinator
/// back.
pub fn run_event_loop<H>(mut coordinator: Coordinator<H>, events: mpsc::Receiver<AppEvent>) -> Coordinator<H>
where
    H: WindowHost + ShortcutRegistry,
{
    info!("coordinator running");
    for event in events {
        coordinator.handle(event);
    }
    info!("all event sources closed, coordinator exiting");
    coordinator
}
