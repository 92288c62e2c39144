use std::sync::mpsc::Sender;

use log::{debug, warn};
use snowrelief_shared::coordinator::{AppEvent, TrayEvent};
use snowrelief_shared::host::TrayMenuItem;
use tauri::{
    menu::{IsMenuItem, Menu, MenuItem},
    tray::{MouseButton, MouseButtonState, TrayIcon, TrayIconBuilder, TrayIconEvent},
    AppHandle, Wry,
};

/// Builds the tray icon with one menu entry per item. Menu picks and left
/// clicks on the icon are forwarded to the coordinator.
pub fn build(
    app: &AppHandle,
    tooltip: &str,
    items: &[TrayMenuItem],
    events: Sender<AppEvent>,
) -> tauri::Result<TrayIcon> {
    let entries = items
        .iter()
        .map(|item| MenuItem::with_id(app, item.id(), item.label(), true, None::<&str>))
        .collect::<tauri::Result<Vec<_>>>()?;
    let refs: Vec<&dyn IsMenuItem<Wry>> = entries
        .iter()
        .map(|entry| entry as &dyn IsMenuItem<Wry>)
        .collect();
    let menu = Menu::with_items(app, &refs)?;

    let menu_events = events.clone();
    let mut builder = TrayIconBuilder::new()
        .tooltip(tooltip)
        .menu(&menu)
        .show_menu_on_left_click(false)
        .on_menu_event(move |_app, event| match TrayMenuItem::from_id(event.id.as_ref()) {
            Some(item) => forward(&menu_events, TrayEvent::Menu(item)),
            None => debug!("ignoring tray menu id {:?}", event.id),
        })
        .on_tray_icon_event(move |_tray, event| {
            if let TrayIconEvent::Click {
                button: MouseButton::Left,
                button_state: MouseButtonState::Up,
                ..
            } = event
            {
                forward(&events, TrayEvent::IconClicked);
            }
        });

    if let Some(icon) = app.default_window_icon() {
        builder = builder.icon(icon.clone());
    }
    builder.build(app)
}

fn forward(events: &Sender<AppEvent>, event: TrayEvent) {
    if events.send(AppEvent::Tray(event)).is_err() {
        warn!("coordinator gone, dropping tray event {:?}", event);
    }
}
