use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable pointing the windows at a development server
/// instead of the bundled pages.
pub const DEV_SERVER_ENV: &str = "SNOWRELIEF_DEV_SERVER_URL";

/// Startup configuration stored in JSON.
///
/// Every field is optional in the file; a minimal `{}` is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Opacity answered by `get-current-opacity` before anyone sets one.
    pub initial_opacity: f64,
    /// Pixels cut from the bottom of every overlay window.
    pub overlay_height_trim: u32,
    /// Re-assert always-on-top on every overlay periodically. Some Linux
    /// window managers drop the flag.
    pub reassert_topmost: bool,
    pub topmost_reassert_ms: u64,
    /// Base URL of a development server, e.g. `http://localhost:8080/`.
    pub dev_server_url: Option<String>,
    pub check_for_updates: bool,
    /// Linux only: disable webview GPU compositing so transparency works.
    pub disable_gpu: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            initial_opacity: 8.0,
            overlay_height_trim: 4,
            reassert_topmost: cfg!(target_os = "linux"),
            topmost_reassert_ms: 300,
            dev_server_url: None,
            check_for_updates: true,
            disable_gpu: true,
        }
    }
}

impl AppConfig {
    /// Load configuration from a JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)
            .map_err(|e| ConfigError(format!("failed to read {}: {}", path.display(), e)))?;
        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| ConfigError(format!("failed to parse {}: {}", path.display(), e)))?;
        Ok(config)
    }

    /// Apply overrides from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_dev_server(std::env::var(DEV_SERVER_ENV).ok())
    }

    fn with_dev_server(mut self, url: Option<String>) -> Self {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            self.dev_server_url = Some(url);
        }
        self
    }
}

/// Error from loading or parsing a configuration file.
#[derive(Debug, thiserror::Error)]
#[error("config error: {0}")]
pub struct ConfigError(String);

pub fn config_path() -> PathBuf {
    let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("SnowRelief").join("config.json")
}

/// Load the user's config, falling back to defaults, then apply
/// environment overrides.
pub fn load_config() -> AppConfig {
    let path = config_path();
    let config = if path.exists() {
        match AppConfig::load(&path) {
            Ok(cfg) => {
                info!("loaded config from {}", path.display());
                cfg
            }
            Err(e) => {
                info!("{}, using defaults", e);
                AppConfig::default()
            }
        }
    } else {
        AppConfig::default()
    };
    config.with_env_overrides()
}
