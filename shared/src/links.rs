//! Decides which navigations leave the app and belong in the system
//! browser.

const APP_ORIGINS: [&str; 6] = [
    "tauri:",
    "asset:",
    "ipc:",
    "http://tauri.localhost",
    "https://tauri.localhost",
    "about:",
];

/// `true` for http(s) URLs that point outside the bundled pages and the
/// development server.
pub fn is_external(url: &str, dev_server: Option<&str>) -> bool {
    if APP_ORIGINS.iter().any(|origin| url.starts_with(origin)) {
        return false;
    }
    if let Some(dev) = dev_server {
        if url.starts_with(dev.trim_end_matches('/')) {
            return false;
        }
    }
    url.starts_with("http://") || url.starts_with("https://")
}
