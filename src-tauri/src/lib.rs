use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use log::{debug, info, warn};
use snowrelief_shared::config::load_config;
use snowrelief_shared::coordinator::{run_event_loop, AppEvent, Coordinator};
use snowrelief_shared::window::WindowLabel;
use tauri::{AppHandle, Manager, RunEvent, WindowEvent};
use tauri_plugin_global_shortcut::ShortcutState;

mod commands;
mod host;
mod platform;
mod tray;
mod updater;

use commands::Events;
use host::{ShortcutNames, TauriHost};

/// Build and run the Tauri application
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = load_config();
    platform::apply_webview_switches(&config);

    let (events, receiver) = mpsc::channel::<AppEvent>();
    let shortcuts = ShortcutNames::default();

    let instance_events = events.clone();
    let press_events = events.clone();
    let press_names = shortcuts.clone();
    let window_events = events.clone();
    let setup_events = events.clone();

    let app = tauri::Builder::default()
        // Must be registered first so a second launch exits before it
        // builds anything.
        .plugin(tauri_plugin_single_instance::init(move |_app, args, _cwd| {
            debug!("second instance launched with {:?}", args);
            if instance_events.send(AppEvent::SecondInstance).is_err() {
                warn!("coordinator gone, ignoring second instance");
            }
        }))
        .plugin(
            tauri_plugin_global_shortcut::Builder::new()
                .with_handler(move |_app, shortcut, event| {
                    // Only trigger on key press, not release
                    if event.state != ShortcutState::Pressed {
                        return;
                    }
                    let Some(accelerator) = press_names.lookup(shortcut.id()) else {
                        debug!("press of unknown shortcut {:?}", shortcut);
                        return;
                    };
                    if press_events.send(AppEvent::HotkeyPressed(accelerator)).is_err() {
                        warn!("coordinator gone, ignoring hotkey");
                    }
                })
                .build(),
        )
        .plugin(tauri_plugin_opener::init())
        .plugin(tauri_plugin_updater::Builder::new().build())
        .manage(Events(events))
        .setup(move |app| {
            let host = TauriHost::new(
                app.handle().clone(),
                setup_events.clone(),
                shortcuts,
                config.dev_server_url.clone(),
            );
            let coordinator = Coordinator::new(host, config.clone());
            thread::Builder::new()
                .name("coordinator".into())
                .spawn(move || {
                    run_event_loop(coordinator, receiver);
                })?;

            setup_events.send(AppEvent::Startup)?;

            if config.reassert_topmost {
                platform::spawn_topmost_timer(
                    setup_events,
                    Duration::from_millis(config.topmost_reassert_ms),
                )?;
            }
            info!("snowrelief {} started", app.package_info().version);
            Ok(())
        })
        .on_window_event(move |window, event| {
            let label = WindowLabel::new(window.label());
            let forwarded = match event {
                // The coordinator decides between hiding and destroying.
                WindowEvent::CloseRequested { api, .. } => {
                    api.prevent_close();
                    window_events.send(AppEvent::CloseRequested(label))
                }
                WindowEvent::Destroyed => window_events.send(AppEvent::Destroyed(label)),
                _ => Ok(()),
            };
            if forwarded.is_err() {
                debug!("coordinator gone, dropping window event");
            }
        })
        .invoke_handler(tauri::generate_handler![commands::ipc])
        .build(tauri::generate_context!())
        .expect("error while building snowrelief");

    app.run(|app, event| match event {
        // The last window went away without anyone asking to exit.
        RunEvent::ExitRequested { code: None, api, .. } => {
            api.prevent_exit();
            if cfg!(target_os = "macos") {
                debug!("all windows closed, staying in the dock");
            } else {
                send(app, AppEvent::AllWindowsClosed);
            }
        }
        #[cfg(target_os = "macos")]
        RunEvent::Reopen { .. } => send(app, AppEvent::Activate),
        _ => {}
    });
}

fn send(app: &AppHandle, event: AppEvent) {
    let events = app.state::<Events>();
    if events.0.send(event).is_err() {
        warn!("coordinator gone, dropping run event");
    }
}
