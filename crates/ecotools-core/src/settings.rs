//! User preferences
//!
//! A small JSON settings file in the app data directory, read once at
//! startup and written back whenever a preference changes.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::units::UnitsSystem;

/// Dark mode flag, persisted as `"enabled"` / `"disabled"`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DarkMode {
    /// Dark theme on
    Enabled,
    /// Dark theme off
    #[default]
    Disabled,
}

impl DarkMode {
    /// True when dark mode is on
    pub fn is_enabled(&self) -> bool {
        matches!(self, DarkMode::Enabled)
    }

    /// The opposite state
    pub fn toggled(&self) -> DarkMode {
        match self {
            DarkMode::Enabled => DarkMode::Disabled,
            DarkMode::Disabled => DarkMode::Enabled,
        }
    }
}

/// Persisted user preferences
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Theme, stored under `darkMode`
    #[serde(rename = "darkMode")]
    pub dark_mode: DarkMode,
    /// Display units
    pub units_system: UnitsSystem,
}

/// Preferences bound to their file
pub struct PreferenceStore {
    path: PathBuf,
    preferences: Preferences,
}

impl PreferenceStore {
    /// Get the default settings file path (in app data)
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let base = dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .ok_or(ConfigError::NoDataDir)?;
        Ok(base.join("EcoTools").join("settings.json"))
    }

    /// Read preferences from `path`.
    ///
    /// A missing file yields defaults. So does an unreadable one, with a
    /// warning, so a corrupt file never blocks startup.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let preferences = match Self::read(&path) {
            Ok(Some(p)) => p,
            Ok(None) => Preferences::default(),
            Err(e) => {
                tracing::warn!("ignoring settings file {}: {}", path.display(), e);
                Preferences::default()
            }
        };

        Self { path, preferences }
    }

    fn read(path: &Path) -> Result<Option<Preferences>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    /// Write the current preferences
    pub fn save(&self) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.preferences)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// Preferences as loaded or last changed
    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    /// Backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flip dark mode and persist the new state
    pub fn toggle_dark_mode(&mut self) -> Result<DarkMode, ConfigError> {
        self.preferences.dark_mode = self.preferences.dark_mode.toggled();
        self.save()?;
        Ok(self.preferences.dark_mode)
    }

    /// Change the unit system and persist it
    pub fn set_units_system(&mut self, units: UnitsSystem) -> Result<(), ConfigError> {
        self.preferences.units_system = units;
        self.save()
    }
}
