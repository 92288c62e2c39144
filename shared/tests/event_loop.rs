use std::collections::HashSet;
use std::sync::mpsc::{self, Sender};
use std::thread;

use serde_json::{json, Value};
use snowrelief_shared::command::{Command, ForwardChannel, HotkeyBinding, Reply};
use snowrelief_shared::config::AppConfig;
use snowrelief_shared::coordinator::{run_event_loop, AppEvent, Coordinator, TrayEvent};
use snowrelief_shared::display::Display;
use snowrelief_shared::host::{ShortcutRegistry, TrayMenuItem, WindowHost};
use snowrelief_shared::window::{LoadAddress, WindowLabel, WindowSpec};

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
struct HostError(String);

/// Mimics the real runtime closely enough to matter: destroying a window
/// comes back to the coordinator as a `Destroyed` event on the same channel.
/// Quitting drops the host's sender so the loop can drain and return.
struct LoopHost {
    events: Option<Sender<AppEvent>>,
    displays: Vec<Display>,
    live: HashSet<String>,
    visible: HashSet<String>,
    messages: Vec<(String, String, Value)>,
    shortcuts: Vec<String>,
    quit: bool,
}

impl LoopHost {
    fn new(events: Sender<AppEvent>, displays: Vec<Display>) -> Self {
        Self {
            events: Some(events),
            displays,
            live: HashSet::new(),
            visible: HashSet::new(),
            messages: Vec::new(),
            shortcuts: Vec::new(),
            quit: false,
        }
    }

    fn check(&self, label: &WindowLabel) -> Result<(), HostError> {
        if self.live.contains(label.as_str()) {
            Ok(())
        } else {
            Err(HostError(format!("no window {label}")))
        }
    }
}

impl WindowHost for LoopHost {
    type Error = HostError;

    fn displays(&self) -> Result<Vec<Display>, HostError> {
        Ok(self.displays.clone())
    }

    fn primary_display(&self) -> Result<Option<Display>, HostError> {
        Ok(self.displays.first().cloned())
    }

    fn create_window(&mut self, spec: &WindowSpec, _: &LoadAddress) -> Result<(), HostError> {
        self.live.insert(spec.label.as_str().to_string());
        if spec.visible {
            self.visible.insert(spec.label.as_str().to_string());
        }
        Ok(())
    }

    fn show(&mut self, label: &WindowLabel) -> Result<(), HostError> {
        self.check(label)?;
        self.visible.insert(label.as_str().to_string());
        Ok(())
    }

    fn hide(&mut self, label: &WindowLabel) -> Result<(), HostError> {
        self.check(label)?;
        self.visible.remove(label.as_str());
        Ok(())
    }

    fn focus(&mut self, label: &WindowLabel) -> Result<(), HostError> {
        self.check(label)
    }

    fn minimize(&mut self, label: &WindowLabel) -> Result<(), HostError> {
        self.check(label)
    }

    fn unminimize(&mut self, label: &WindowLabel) -> Result<(), HostError> {
        self.check(label)
    }

    fn is_visible(&self, label: &WindowLabel) -> Result<bool, HostError> {
        self.check(label)?;
        Ok(self.visible.contains(label.as_str()))
    }

    fn is_minimized(&self, label: &WindowLabel) -> Result<bool, HostError> {
        self.check(label)?;
        Ok(false)
    }

    fn destroy(&mut self, label: &WindowLabel) -> Result<(), HostError> {
        self.check(label)?;
        self.live.remove(label.as_str());
        self.visible.remove(label.as_str());
        if let Some(events) = &self.events {
            events
                .send(AppEvent::Destroyed(label.clone()))
                .map_err(|e| HostError(e.to_string()))?;
        }
        Ok(())
    }

    fn set_always_on_top(&mut self, label: &WindowLabel) -> Result<(), HostError> {
        self.check(label)
    }

    fn send(&mut self, label: &WindowLabel, channel: &str, payload: &Value) -> Result<(), HostError> {
        self.check(label)?;
        self.messages
            .push((label.as_str().to_string(), channel.to_string(), payload.clone()));
        Ok(())
    }

    fn create_tray(&mut self, _: &str, _: &[TrayMenuItem]) -> Result<(), HostError> {
        Ok(())
    }

    fn check_for_updates(&mut self) {}

    fn quit(&mut self) {
        self.quit = true;
        self.events = None;
    }
}

impl ShortcutRegistry for LoopHost {
    type Error = HostError;

    fn register(&mut self, accelerator: &str) -> Result<(), HostError> {
        self.shortcuts.push(accelerator.to_string());
        Ok(())
    }

    fn unregister(&mut self, accelerator: &str) -> Result<(), HostError> {
        self.shortcuts.retain(|a| a != accelerator);
        Ok(())
    }
}

fn displays() -> Vec<Display> {
    vec![
        Display::new("eDP-1", 0, 0, 1920, 1200),
        Display::new("DP-2", 1920, 0, 3840, 2160),
    ]
}

/// Spawns the loop on its own thread, the way the shell does. The handle
/// yields the coordinator once the app has quit and `events` is dropped.
fn spawn_loop() -> (Sender<AppEvent>, thread::JoinHandle<Coordinator<LoopHost>>) {
    let (tx, rx) = mpsc::channel();
    let host = LoopHost::new(tx.clone(), displays());
    let coordinator = Coordinator::new(host, AppConfig::default());
    let handle = thread::spawn(move || run_event_loop(coordinator, rx));
    (tx, handle)
}

fn invoke(events: &Sender<AppEvent>, command: Command) -> Reply {
    let (tx, rx) = mpsc::channel();
    events
        .send(AppEvent::Invoke {
            command,
            reply: Some(tx),
        })
        .unwrap();
    rx.recv().unwrap().unwrap()
}

#[test]
fn commands_from_another_thread_are_answered_in_order() {
    let (events, handle) = spawn_loop();
    events.send(AppEvent::Startup).unwrap();

    assert_eq!(invoke(&events, Command::GetCurrentOpacity), Reply::Opacity(8.0));
    assert_eq!(invoke(&events, Command::ChangeOpacity(64.0)), Reply::Done);
    assert_eq!(invoke(&events, Command::GetCurrentOpacity), Reply::Opacity(64.0));
    invoke(
        &events,
        Command::Forward {
            channel: ForwardChannel::OverlaySpeed,
            payload: json!(1.5),
        },
    );

    events
        .send(AppEvent::Tray(TrayEvent::Menu(TrayMenuItem::Quit)))
        .unwrap();
    drop(events);
    let c = handle.join().unwrap();

    assert!(c.is_quitting());
    assert!(c.host().quit);
    let speed: Vec<&str> = c
        .host()
        .messages
        .iter()
        .filter(|(_, channel, _)| channel == "change-overlay-speed")
        .map(|(label, _, _)| label.as_str())
        .collect();
    assert_eq!(speed, ["overlay-0", "overlay-1", "settings"]);
}

#[test]
fn destroyed_overlay_is_dropped_through_the_loop() {
    let (events, handle) = spawn_loop();
    events.send(AppEvent::Startup).unwrap();
    events
        .send(AppEvent::CloseRequested(WindowLabel::overlay(0)))
        .unwrap();
    // Once this is answered the host's Destroyed event is already queued.
    invoke(&events, Command::GetCurrentOpacity);
    events.send(AppEvent::AllWindowsClosed).unwrap();
    drop(events);

    let c = handle.join().unwrap();
    let labels: Vec<&str> = c.overlays().iter().map(|o| o.label.as_str()).collect();
    assert_eq!(labels, ["overlay-1"]);
    assert!(c.settings().is_some());
}

#[test]
fn hotkey_toggles_settings_through_the_loop() {
    let (events, handle) = spawn_loop();
    events.send(AppEvent::Startup).unwrap();
    invoke(
        &events,
        Command::ChangeHotkey(HotkeyBinding::new("Super+S", "Super + S")),
    );
    events
        .send(AppEvent::HotkeyPressed("Super+S".into()))
        .unwrap();
    invoke(&events, Command::CloseApp);
    drop(events);

    let c = handle.join().unwrap();
    assert!(c.host().visible.contains("settings"));
    assert_eq!(c.host().shortcuts, ["Super+S"]);
}
