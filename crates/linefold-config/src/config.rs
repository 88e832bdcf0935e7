/// Sidebar configuration: load, save, and sanitize.
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// File name of the configuration file.
pub const CONFIG_FILE_NAME: &str = "linefold.json";

/// Top-level configuration for the line-number sidebar and its host window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SidebarConfig {
    pub show_line_numbers: bool,
    pub show_fold_indicators: bool,
    pub font_size: f32,
    /// Row height as a multiple of the font size.
    pub line_height_factor: f32,
    /// Minimum milliseconds between two fold-region rebuilds (minimum 250).
    pub rebuild_interval_ms: u64,
    /// Milliseconds between checks for a pending rebuild (minimum 100).
    pub poll_interval_ms: u64,
    /// Milliseconds between drag auto-scroll ticks (10 to 1000).
    pub auto_scroll_tick_ms: u64,
    /// Whether to reload the open file when it changes on disk.
    pub live_reload: bool,
    /// Seconds between on-disk change checks (minimum 1).
    pub file_check_interval_secs: u64,
}

impl Default for SidebarConfig {
    fn default() -> Self {
        Self {
            show_line_numbers: true,
            show_fold_indicators: true,
            font_size: 14.0,
            line_height_factor: 1.3,
            rebuild_interval_ms: 2000,
            poll_interval_ms: 1000,
            auto_scroll_tick_ms: 50,
            live_reload: true,
            file_check_interval_secs: 1,
        }
    }
}

impl SidebarConfig {
    /// Returns the config file path: exe directory + `linefold.json`.
    ///
    /// Falls back to the user config directory, then the working directory.
    pub fn config_path() -> PathBuf {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|d| d.join(CONFIG_FILE_NAME)))
            .or_else(|| dirs::config_dir().map(|d| d.join("linefold").join(CONFIG_FILE_NAME)))
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME))
    }

    /// Loads config from `path`, creating a default file if it doesn't exist.
    /// Returns defaults on any error (missing file, parse error, etc.).
    pub fn load_or_create(path: &Path) -> Self {
        if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(contents) => match serde_json::from_str::<SidebarConfig>(&contents) {
                    Ok(mut config) => {
                        config.sanitize();
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {}: {e}", path.display());
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {}: {e}", path.display());
                }
            }
            // Don't overwrite a broken file.
            Self::default()
        } else {
            let config = Self::default();
            if let Err(e) = config.save(path) {
                tracing::warn!("Failed to create default config at {}: {e}", path.display());
            }
            config
        }
    }

    /// Saves config to `path` as pretty-printed JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }

    /// Clamps values to valid ranges.
    pub fn sanitize(&mut self) {
        if !self.font_size.is_finite() {
            self.font_size = Self::default().font_size;
        }
        self.font_size = self.font_size.clamp(6.0, 72.0);
        if !self.line_height_factor.is_finite() {
            self.line_height_factor = Self::default().line_height_factor;
        }
        self.line_height_factor = self.line_height_factor.clamp(1.0, 3.0);
        self.rebuild_interval_ms = self.rebuild_interval_ms.max(250);
        self.poll_interval_ms = self.poll_interval_ms.max(100);
        self.auto_scroll_tick_ms = self.auto_scroll_tick_ms.clamp(10, 1000);
        self.file_check_interval_secs = self.file_check_interval_secs.max(1);
    }

    pub fn rebuild_interval(&self) -> Duration {
        Duration::from_millis(self.rebuild_interval_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn auto_scroll_tick(&self) -> Duration {
        Duration::from_millis(self.auto_scroll_tick_ms)
    }

    pub fn file_check_interval(&self) -> Duration {
        Duration::from_secs(self.file_check_interval_secs)
    }

    /// Row height in points for the configured font size.
    pub fn line_height(&self) -> f32 {
        self.font_size * self.line_height_factor
    }
}
