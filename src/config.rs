//! Tool settings and the host mod manager's settings
//!
//! Settings are stored as JSON at `<config dir>/mmpack/settings.json`
//! (`MMPACK_CONFIG_DIR` overrides the directory). The host mod manager keeps
//! its own settings file, which is only ever read to guess a default
//! platform code.
//!
//! # Examples
//!
//! ```no_run
//! use mmpack::Settings;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut settings = Settings::load()?;
//! settings.mod_folder = Some("/games/mods".into());
//! settings.save()?;
//! # Ok(())
//! # }
//! ```

use crate::{Error, PlatformCode, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const SETTINGS_FILE: &str = "settings.json";

/// User settings (`settings.json`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Folder new packages are built into
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mod_folder: Option<PathBuf>,

    /// Preferred platform code, overrides the host manager's launcher
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<PlatformCode>,

    /// Folder for exported metadata and repacked packages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<PathBuf>,
}

impl Settings {
    /// Get the settings file path
    ///
    /// Uses MMPACK_CONFIG_DIR if set, otherwise `<config dir>/mmpack/settings.json`
    pub fn default_path() -> Result<PathBuf> {
        if let Ok(config_dir) = std::env::var("MMPACK_CONFIG_DIR") {
            return Ok(PathBuf::from(config_dir).join(SETTINGS_FILE));
        }

        let config_dir = dirs::config_dir()
            .ok_or_else(|| Error::Other("Could not find config directory".to_string()))?;
        Ok(config_dir.join("mmpack").join(SETTINGS_FILE))
    }

    /// Load settings, falling back to defaults if the file is missing or unreadable
    pub fn load() -> Result<Self> {
        Ok(Self::load_from(&Self::default_path()?))
    }

    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(path)
            .map_err(Error::from)
            .and_then(|content| serde_json::from_str(&content).map_err(Error::from))
        {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("Ignoring settings file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::default_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::fs(parent, e))?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).map_err(|e| Error::fs(path, e))?;
        Ok(())
    }

    /// Platform to build for when none is given explicitly
    pub fn resolve_platform(&self, host: &HostSettings) -> PlatformCode {
        self.platform.unwrap_or_else(|| host.platform_code())
    }

    /// Folder for exports and repacks: configured folder, then desktop, then home
    pub fn resolve_export_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.export_dir {
            return Ok(dir.clone());
        }

        dirs::desktop_dir()
            .filter(|dir| dir.is_dir())
            .or_else(dirs::home_dir)
            .ok_or_else(|| Error::Other("Could not find a desktop or home directory".to_string()))
    }
}

/// Read-only view of the host mod manager's settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct HostSettings {
    /// Launcher name such as "Steam" or "Epic Games"
    #[serde(default)]
    pub platform: Option<String>,
}

impl HostSettings {
    /// Get the host settings path
    ///
    /// Uses MMPACK_HOST_SETTINGS if set, otherwise `<config dir>/disobey.top/settings.json`
    pub fn default_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("MMPACK_HOST_SETTINGS") {
            return Some(PathBuf::from(path));
        }

        dirs::config_dir().map(|dir| dir.join("disobey.top").join(SETTINGS_FILE))
    }

    /// Load the host settings; absence or parse failure yields empty settings
    pub fn load() -> Self {
        Self::default_path()
            .map(|path| Self::load_from(&path))
            .unwrap_or_default()
    }

    pub fn load_from(path: &Path) -> Self {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(_) => return Self::default(),
        };

        serde_json::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!("Ignoring host settings {}: {}", path.display(), e);
            Self::default()
        })
    }

    pub fn platform_code(&self) -> PlatformCode {
        self.platform
            .as_deref()
            .map(PlatformCode::from_launcher)
            .unwrap_or_default()
    }
}
