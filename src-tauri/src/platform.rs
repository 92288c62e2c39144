use std::io;
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::{debug, info};
use snowrelief_shared::config::AppConfig;
use snowrelief_shared::coordinator::AppEvent;
use tauri::WebviewWindow;

/// WebKitGTK switches that keep transparent overlays working without GPU
/// compositing. Must run before the runtime starts.
pub fn apply_webview_switches(config: &AppConfig) {
    #[cfg(target_os = "linux")]
    if config.disable_gpu {
        std::env::set_var("WEBKIT_DISABLE_COMPOSITING_MODE", "1");
        std::env::set_var("WEBKIT_DISABLE_DMABUF_RENDERER", "1");
        info!("webview GPU compositing disabled");
    }
    #[cfg(not(target_os = "linux"))]
    let _ = config;
}

/// Some window managers drop always-on-top when another window goes
/// fullscreen. Ticks `ReassertTopmost` until the coordinator is gone.
pub fn spawn_topmost_timer(events: Sender<AppEvent>, every: Duration) -> io::Result<JoinHandle<()>> {
    info!("re-asserting overlay stacking every {:?}", every);
    thread::Builder::new()
        .name("topmost-timer".into())
        .spawn(move || loop {
            thread::sleep(every);
            if events.send(AppEvent::ReassertTopmost).is_err() {
                debug!("coordinator gone, stopping topmost timer");
                break;
            }
        })
}

/// Lifts an overlay into the screen-saver band so it stays above
/// full-screen apps and the menu bar. AppKit calls are queued onto the main
/// thread.
#[cfg(target_os = "macos")]
pub fn raise_to_screen_saver_level(window: &WebviewWindow) -> tauri::Result<()> {
    use objc2_app_kit::{NSScreenSaverWindowLevel, NSWindow};

    let target = window.clone();
    window.run_on_main_thread(move || {
        let ns_window = match target.ns_window() {
            Ok(ptr) if !ptr.is_null() => ptr.cast::<NSWindow>(),
            Ok(_) => return,
            Err(e) => {
                log::warn!("no native window for {}: {}", target.label(), e);
                return;
            }
        };
        // SAFETY: Tauri owns the NSWindow for as long as `target` is alive,
        // and this closure runs on the main thread.
        let ns_window = unsafe { &*ns_window };
        ns_window.setLevel(NSScreenSaverWindowLevel);
    })
}

/// Elsewhere the always-on-top flag is already the highest band Tauri
/// exposes.
#[cfg(not(target_os = "macos"))]
pub fn raise_to_screen_saver_level(_window: &WebviewWindow) -> tauri::Result<()> {
    Ok(())
}
