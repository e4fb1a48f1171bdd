//! Application settings, stored as JSON in the platform config directory.
//!
//! Settings are separate from boards: they remember where boards are saved,
//! whether autosave is on, and the gesture tuning knobs.

use crate::constants::{
    APP_DIR_NAME, AUTOSAVE_KICK_MS, DEFAULT_FILE_NAME, DRAG_THRESHOLD_PX, SAVE_DEBOUNCE_MS,
    ZOOM_SENSITIVITY,
};
use crate::error::SettingsError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

const SETTINGS_FILE_NAME: &str = "settings.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub autosave: bool,
    /// Debounce for ordinary edits
    pub save_debounce_ms: u64,
    /// Delay for the save kicked off when autosave is switched on
    pub autosave_kick_ms: u64,
    pub zoom_sensitivity: f64,
    pub drag_threshold_px: f64,
    /// Folder boards are saved into; unset until the user picks one
    pub save_folder: Option<PathBuf>,
    pub file_name: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            autosave: false,
            save_debounce_ms: SAVE_DEBOUNCE_MS,
            autosave_kick_ms: AUTOSAVE_KICK_MS,
            zoom_sensitivity: ZOOM_SENSITIVITY,
            drag_threshold_px: DRAG_THRESHOLD_PX,
            save_folder: None,
            file_name: DEFAULT_FILE_NAME.to_string(),
        }
    }
}

/// `<config dir>/pinboard/settings.json`, if the platform has a config dir.
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(SETTINGS_FILE_NAME))
}

impl AppSettings {
    pub fn save_debounce(&self) -> Duration {
        Duration::from_millis(self.save_debounce_ms)
    }

    pub fn autosave_kick(&self) -> Duration {
        Duration::from_millis(self.autosave_kick_ms)
    }

    /// Load from the default location, falling back to defaults on any error.
    pub fn load() -> Self {
        let Some(path) = default_settings_path() else {
            warn!("No config directory, using default settings");
            return Self::default();
        };
        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "Using default settings");
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path)?;
        let mut settings: Self = serde_json::from_str(&json)?;
        settings.sanitize();
        Ok(settings)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Replace nonsense values with defaults.
    fn sanitize(&mut self) {
        let defaults = Self::default();
        if !(self.zoom_sensitivity.is_finite() && self.zoom_sensitivity > 0.0) {
            self.zoom_sensitivity = defaults.zoom_sensitivity;
        }
        if !(self.drag_threshold_px.is_finite() && self.drag_threshold_px >= 0.0) {
            self.drag_threshold_px = defaults.drag_threshold_px;
        }
        if self.file_name.trim().is_empty() {
            self.file_name = defaults.file_name;
        }
    }
}
