use super::paths::get_cache_dir;
use crate::kernel::services::ports::settings::TouchSettings;
use std::io;
use std::path::{Path, PathBuf};

const SETTINGS_DIR: &str = ".ztouch";
const SETTINGS_FILE: &str = "touch.json";

pub type Result<T> = std::result::Result<T, SettingsError>;

#[derive(Debug)]
pub enum SettingsError {
    Io(io::Error),
    Parse(serde_json::Error),
    NoSettingsDir,
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "IO error: {}", e),
            SettingsError::Parse(e) => write!(f, "Invalid settings: {}", e),
            SettingsError::NoSettingsDir => write!(f, "Cannot determine settings directory"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(e) => Some(e),
            SettingsError::Parse(e) => Some(e),
            SettingsError::NoSettingsDir => None,
        }
    }
}

impl From<io::Error> for SettingsError {
    fn from(e: io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Parse(e)
    }
}

pub fn get_settings_path() -> Option<PathBuf> {
    get_cache_dir().map(|dir| dir.join(SETTINGS_DIR).join(SETTINGS_FILE))
}

/// Writes the default settings to `path` unless a file already exists.
pub fn ensure_settings_file_at(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    if !path.exists() {
        let content = serde_json::to_string_pretty(&TouchSettings::default())?;
        std::fs::write(path, content)?;
    }
    Ok(())
}

pub fn ensure_settings_file() -> Result<PathBuf> {
    let path = get_settings_path().ok_or(SettingsError::NoSettingsDir)?;
    ensure_settings_file_at(&path)?;
    Ok(path)
}

pub fn load_settings_from(path: &Path) -> Result<TouchSettings> {
    let data = std::fs::read_to_string(path)?;
    let settings: TouchSettings = serde_json::from_str(&data)?;
    let sanitized = settings.clone().sanitized();
    if sanitized != settings {
        tracing::warn!(path = %path.display(), "touch settings out of range, clamped");
    }
    Ok(sanitized)
}

/// Loads the user settings, falling back to defaults on any problem.
pub fn load_settings() -> TouchSettings {
    let Some(path) = get_settings_path() else {
        return TouchSettings::default();
    };
    match load_settings_from(&path) {
        Ok(settings) => settings,
        Err(SettingsError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
            TouchSettings::default()
        }
        Err(error) => {
            tracing::warn!(path = %path.display(), error = %error, "load touch settings failed");
            TouchSettings::default()
        }
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/settings.rs"]
mod tests;
