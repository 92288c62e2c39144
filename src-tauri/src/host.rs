//! [`WindowHost`] and [`ShortcutRegistry`] on top of a Tauri [`AppHandle`].
//!
//! Every method is called from the coordinator thread. Tauri marshals the
//! native work onto the main thread itself, so nothing here blocks the
//! event loop that feeds the coordinator.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex, PoisonError};

use log::{debug, info, warn};
use serde_json::Value;
use snowrelief_shared::coordinator::AppEvent;
use snowrelief_shared::display::Display;
use snowrelief_shared::host::{ShortcutRegistry, TrayMenuItem, WindowHost};
use snowrelief_shared::links;
use snowrelief_shared::window::{LoadAddress, WindowKind, WindowLabel, WindowLevel, WindowSpec};
use tauri::tray::TrayIcon;
use tauri::{
    AppHandle, Emitter, EventTarget, Manager, Monitor, Url, WebviewUrl, WebviewWindow,
    WebviewWindowBuilder,
};
use tauri_plugin_global_shortcut::{GlobalShortcutExt, Shortcut};
use tauri_plugin_opener::OpenerExt;

use crate::{platform, tray, updater};

#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error(transparent)]
    Tauri(#[from] tauri::Error),
    #[error("no window labelled {0}")]
    NoWindow(String),
    #[error("invalid url {url}: {reason}")]
    Url { url: String, reason: String },
    #[error("invalid accelerator {accelerator}: {reason}")]
    Accelerator { accelerator: String, reason: String },
    #[error("global shortcut {accelerator}: {reason}")]
    Shortcut { accelerator: String, reason: String },
}

/// Maps the id the shortcut plugin reports on a press back to the
/// accelerator string the coordinator registered.
#[derive(Debug, Clone, Default)]
pub struct ShortcutNames(Arc<Mutex<HashMap<u32, String>>>);

impl ShortcutNames {
    pub fn lookup(&self, id: u32) -> Option<String> {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
    }

    fn insert(&self, id: u32, accelerator: &str) {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, accelerator.to_string());
    }

    fn remove(&self, id: u32) {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id);
    }
}

pub struct TauriHost {
    app: AppHandle,
    events: Sender<AppEvent>,
    shortcuts: ShortcutNames,
    dev_server: Option<String>,
    tray: Option<TrayIcon>,
}

impl TauriHost {
    pub fn new(
        app: AppHandle,
        events: Sender<AppEvent>,
        shortcuts: ShortcutNames,
        dev_server: Option<String>,
    ) -> Self {
        Self {
            app,
            events,
            shortcuts,
            dev_server,
            tray: None,
        }
    }

    fn window(&self, label: &WindowLabel) -> Result<WebviewWindow, HostError> {
        self.app
            .get_webview_window(label.as_str())
            .ok_or_else(|| HostError::NoWindow(label.to_string()))
    }

    fn webview_url(address: &LoadAddress) -> Result<WebviewUrl, HostError> {
        match address {
            LoadAddress::App(path) => Ok(WebviewUrl::App(path.into())),
            LoadAddress::External(url) => url
                .parse::<Url>()
                .map(WebviewUrl::External)
                .map_err(|e| HostError::Url {
                    url: url.clone(),
                    reason: e.to_string(),
                }),
        }
    }

    fn parse_shortcut(accelerator: &str) -> Result<Shortcut, HostError> {
        Shortcut::from_str(accelerator).map_err(|e| HostError::Accelerator {
            accelerator: accelerator.to_string(),
            reason: e.to_string(),
        })
    }
}

/// Monitors report physical pixels; windows are placed in logical ones.
fn to_display(index: usize, monitor: &Monitor) -> Display {
    let scale = monitor.scale_factor();
    let position = monitor.position().to_logical::<f64>(scale);
    let size = monitor.size().to_logical::<f64>(scale);
    let id = monitor
        .name()
        .cloned()
        .unwrap_or_else(|| format!("display-{index}"));
    Display::new(
        id,
        position.x.round() as i32,
        position.y.round() as i32,
        size.width.round() as u32,
        size.height.round() as u32,
    )
}

impl WindowHost for TauriHost {
    type Error = HostError;

    fn displays(&self) -> Result<Vec<Display>, HostError> {
        let monitors = self.app.available_monitors()?;
        Ok(monitors
            .iter()
            .enumerate()
            .map(|(i, m)| to_display(i, m))
            .collect())
    }

    fn primary_display(&self) -> Result<Option<Display>, HostError> {
        Ok(self.app.primary_monitor()?.map(|m| to_display(0, &m)))
    }

    fn create_window(&mut self, spec: &WindowSpec, address: &LoadAddress) -> Result<(), HostError> {
        let url = Self::webview_url(address)?;
        let mut builder = WebviewWindowBuilder::new(&self.app, spec.label.as_str(), url)
            .title(spec.title)
            .inner_size(spec.size.width as f64, spec.size.height as f64)
            .decorations(spec.decorations)
            .transparent(spec.transparent)
            .shadow(spec.shadow)
            .always_on_top(spec.always_on_top)
            .visible_on_all_workspaces(spec.visible_on_all_workspaces)
            .skip_taskbar(spec.skip_taskbar)
            .resizable(spec.resizable)
            .visible(spec.visible)
            .focused(spec.focused);

        builder = match spec.position {
            Some((x, y)) => builder.position(x as f64, y as f64),
            None => builder.center(),
        };

        if let Some(parent) = &spec.parent {
            builder = builder.parent(&self.window(parent)?)?;
        }

        if spec.kind == WindowKind::Settings {
            let app = self.app.clone();
            let dev_server = self.dev_server.clone();
            builder = builder.on_navigation(move |url| {
                if !links::is_external(url.as_str(), dev_server.as_deref()) {
                    return true;
                }
                info!("opening {} in the system browser", url);
                if let Err(e) = app.opener().open_url(url.as_str(), None::<&str>) {
                    warn!("failed to open {}: {}", url, e);
                }
                false
            });
        }

        let window = builder.build()?;
        if spec.click_through {
            window.set_ignore_cursor_events(true)?;
        }
        if spec.level == WindowLevel::ScreenSaver {
            platform::raise_to_screen_saver_level(&window)?;
        }
        debug!("built window {}", spec.label);
        Ok(())
    }

    fn show(&mut self, label: &WindowLabel) -> Result<(), HostError> {
        Ok(self.window(label)?.show()?)
    }

    fn hide(&mut self, label: &WindowLabel) -> Result<(), HostError> {
        Ok(self.window(label)?.hide()?)
    }

    fn focus(&mut self, label: &WindowLabel) -> Result<(), HostError> {
        Ok(self.window(label)?.set_focus()?)
    }

    fn minimize(&mut self, label: &WindowLabel) -> Result<(), HostError> {
        Ok(self.window(label)?.minimize()?)
    }

    fn unminimize(&mut self, label: &WindowLabel) -> Result<(), HostError> {
        Ok(self.window(label)?.unminimize()?)
    }

    fn is_visible(&self, label: &WindowLabel) -> Result<bool, HostError> {
        Ok(self.window(label)?.is_visible()?)
    }

    fn is_minimized(&self, label: &WindowLabel) -> Result<bool, HostError> {
        Ok(self.window(label)?.is_minimized()?)
    }

    fn destroy(&mut self, label: &WindowLabel) -> Result<(), HostError> {
        Ok(self.window(label)?.destroy()?)
    }

    fn set_always_on_top(&mut self, label: &WindowLabel) -> Result<(), HostError> {
        let window = self.window(label)?;
        window.set_always_on_top(true)?;
        // Dropping the flag also drops the window out of its raised band.
        if label.is_overlay() {
            platform::raise_to_screen_saver_level(&window)?;
        }
        Ok(())
    }

    fn send(&mut self, label: &WindowLabel, channel: &str, payload: &Value) -> Result<(), HostError> {
        // `emit_to` silently drops events for unknown targets.
        self.window(label)?;
        self.app
            .emit_to(EventTarget::webview_window(label.as_str()), channel, payload)?;
        Ok(())
    }

    fn create_tray(&mut self, tooltip: &str, items: &[TrayMenuItem]) -> Result<(), HostError> {
        let icon = tray::build(&self.app, tooltip, items, self.events.clone())?;
        self.tray = Some(icon);
        Ok(())
    }

    fn check_for_updates(&mut self) {
        tauri::async_runtime::spawn(updater::check(self.app.clone()));
    }

    fn quit(&mut self) {
        self.app.exit(0);
    }
}

impl ShortcutRegistry for TauriHost {
    type Error = HostError;

    fn register(&mut self, accelerator: &str) -> Result<(), HostError> {
        let shortcut = Self::parse_shortcut(accelerator)?;
        let id = shortcut.id();
        self.app
            .global_shortcut()
            .register(shortcut)
            .map_err(|e| HostError::Shortcut {
                accelerator: accelerator.to_string(),
                reason: e.to_string(),
            })?;
        self.shortcuts.insert(id, accelerator);
        Ok(())
    }

    fn unregister(&mut self, accelerator: &str) -> Result<(), HostError> {
        let shortcut = Self::parse_shortcut(accelerator)?;
        self.shortcuts.remove(shortcut.id());
        self.app
            .global_shortcut()
            .unregister(shortcut)
            .map_err(|e| HostError::Shortcut {
                accelerator: accelerator.to_string(),
                reason: e.to_string(),
            })
    }
}
