// Release check against the updater endpoint configured in tauri.conf.json

use log::{info, warn};
use serde_json::json;
use snowrelief_shared::command::UPDATE_AVAILABLE;
use snowrelief_shared::window::SETTINGS_LABEL;
use tauri::{AppHandle, Emitter, EventTarget};
use tauri_plugin_updater::UpdaterExt;

/// Checks once for a newer release and tells the settings content about it.
/// Never fails: an unreachable endpoint or a missing release just means no
/// update.
pub async fn check(app: AppHandle) {
    let updater = match app.updater_builder().build() {
        Ok(updater) => updater,
        Err(e) => {
            warn!("updater unavailable: {}", e);
            return;
        }
    };

    match updater.check().await {
        Ok(Some(update)) => {
            info!(
                "update available: {} (running {})",
                update.version, update.current_version
            );
            let payload = json!({
                "version": update.version,
                "notes": update.body,
            });
            if let Err(e) = app.emit_to(
                EventTarget::webview_window(SETTINGS_LABEL),
                UPDATE_AVAILABLE,
                payload,
            ) {
                warn!("failed to announce update: {}", e);
            }
        }
        Ok(None) => info!("no update available"),
        Err(e) => {
            let message = e.to_string();
            if is_unreachable(&message) {
                info!("no releases found or endpoint unreachable: {}", message);
            } else {
                warn!("update check failed: {}", message);
            }
        }
    }
}

/// Treat network errors and 404s (no releases yet) as "no update".
fn is_unreachable(message: &str) -> bool {
    ["404", "network", "connect", "status code"]
        .iter()
        .any(|needle| message.contains(needle))
}
