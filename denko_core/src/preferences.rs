//! # User Preferences
//!
//! The persisted user settings: light/dark theme and the defaults the
//! calculators open with. Stored as pretty-printed JSON.
//!
//! Saves are atomic: the record is written to `<file>.tmp`, read back and
//! parsed, then renamed over the target so a crash never leaves a
//! half-written file.
//!
//! ## Example
//!
//! ```rust,no_run
//! use denko_core::preferences::{load_preferences, save_preferences, Theme};
//! use std::path::Path;
//!
//! let path = Path::new("denko-prefs.json");
//! let mut prefs = load_preferences(path)?;
//! prefs.toggle_theme();
//! save_preferences(&prefs, path)?;
//! # Ok::<(), denko_core::errors::CalcError>(())
//! ```

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::circuits::CircuitType;
use crate::errors::{CalcError, CalcResult};
use crate::materials::{AmbientTemperature, Insulation};

/// Current preference file schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Color scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(&self) -> bool {
        *self == Theme::Dark
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Theme::Light => write!(f, "light"),
            Theme::Dark => write!(f, "dark"),
        }
    }
}

/// Persisted user preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    /// Schema version (semver)
    pub version: String,
    pub theme: Theme,
    /// Circuit type preselected on the drop calculators
    #[serde(default)]
    pub default_circuit: CircuitType,
    /// Insulation class preselected on ampacity screens
    #[serde(default)]
    pub default_insulation: Insulation,
    /// Ambient temperature preselected on ampacity screens (°C)
    #[serde(default = "default_temperature_c")]
    pub default_temperature_c: i32,
    /// Last modification time
    pub modified: DateTime<Utc>,
}

fn default_temperature_c() -> i32 {
    AmbientTemperature::default().celsius()
}

impl Default for Preferences {
    fn default() -> Self {
        Preferences {
            version: SCHEMA_VERSION.to_string(),
            theme: Theme::default(),
            default_circuit: CircuitType::default(),
            default_insulation: Insulation::default(),
            default_temperature_c: default_temperature_c(),
            modified: Utc::now(),
        }
    }
}

impl Preferences {
    /// Flip light/dark and return the new theme
    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.touch();
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        self.touch();
    }

    /// Update the modified timestamp
    pub fn touch(&mut self) {
        self.modified = Utc::now();
    }

    /// Default temperature as a table row. Falls back to 30 °C if the stored
    /// value is not tabulated.
    pub fn default_temperature(&self) -> AmbientTemperature {
        AmbientTemperature::from_celsius(self.default_temperature_c).unwrap_or_default()
    }
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

/// Save preferences with an atomic write.
pub fn save_preferences(prefs: &Preferences, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(prefs).map_err(|e| CalcError::serialization(e.to_string()))?;

    let tmp_path = tmp_path_for(path);

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;
    tmp_file.write_all(json.as_bytes()).map_err(|e| {
        CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;
    tmp_file.sync_all().map_err(|e| {
        CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;
    drop(tmp_file);

    // Read back before replacing the real file
    let written = fs::read_to_string(&tmp_path).map_err(|e| {
        CalcError::file_error("verify temp file", tmp_path.display().to_string(), e.to_string())
    })?;
    if let Err(e) = serde_json::from_str::<Preferences>(&written) {
        let _ = fs::remove_file(&tmp_path);
        return Err(CalcError::serialization(format!("verification failed: {}", e)));
    }

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    debug!(path = %path.display(), theme = %prefs.theme, "preferences saved");
    Ok(())
}

/// Load preferences. A missing file yields the defaults.
///
/// # Returns
///
/// * `Err(CalcError::VersionMismatch)` - File written by a newer major version
/// * `Err(CalcError::SerializationError)` - Invalid JSON
/// * `Err(CalcError::FileError)` - Other I/O error
pub fn load_preferences(path: &Path) -> CalcResult<Preferences> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "no preference file, using defaults");
            return Ok(Preferences::default());
        }
        Err(e) => return Err(CalcError::file_error("read", path.display().to_string(), e.to_string())),
    };

    let mut prefs: Preferences = serde_json::from_str(&contents)
        .map_err(|e| CalcError::serialization(format!("Invalid JSON in {}: {}", path.display(), e)))?;

    match compare_major(&prefs.version)? {
        std::cmp::Ordering::Greater => {
            return Err(CalcError::VersionMismatch {
                file_version: prefs.version,
                expected_version: SCHEMA_VERSION.to_string(),
            });
        }
        std::cmp::Ordering::Less => {
            warn!(
                path = %path.display(),
                file_version = %prefs.version,
                current = SCHEMA_VERSION,
                "preference file uses an older schema, upgrading"
            );
            prefs.version = SCHEMA_VERSION.to_string();
        }
        std::cmp::Ordering::Equal => {}
    }

    debug!(path = %path.display(), theme = %prefs.theme, "preferences loaded");
    Ok(prefs)
}

fn major(version: &str) -> Option<u32> {
    version.split('.').next()?.trim().parse().ok()
}

/// Compare a file's major version with the current one
fn compare_major(file_version: &str) -> CalcResult<std::cmp::Ordering> {
    match (major(file_version), major(SCHEMA_VERSION)) {
        (Some(file), Some(current)) => Ok(file.cmp(&current)),
        _ => Err(CalcError::VersionMismatch {
            file_version: file_version.to_string(),
            expected_version: SCHEMA_VERSION.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env::temp_dir;

    fn temp_prefs_path(name: &str) -> PathBuf {
        temp_dir().join(format!("denko_test_{}_{}.json", name, std::process::id()))
    }

    #[test]
    fn test_toggle_theme() {
        let mut prefs = Preferences::default();
        assert_eq!(prefs.theme, Theme::Light);
        assert_eq!(prefs.toggle_theme(), Theme::Dark);
        assert!(prefs.theme.is_dark());
        assert_eq!(prefs.toggle_theme(), Theme::Light);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let path = temp_prefs_path("missing");
        let _ = fs::remove_file(&path);
        let prefs = load_preferences(&path).unwrap();
        assert_eq!(prefs.theme, Theme::Light);
        assert_eq!(prefs.version, SCHEMA_VERSION);
        assert_eq!(prefs.default_temperature(), AmbientTemperature::C30);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let path = temp_prefs_path("roundtrip");
        let mut prefs = Preferences::default();
        prefs.set_theme(Theme::Dark);
        prefs.default_circuit = CircuitType::ThreePhaseThreeWire;
        prefs.default_insulation = Insulation::Hiv;

        save_preferences(&prefs, &path).unwrap();
        assert!(!tmp_path_for(&path).exists());

        let loaded = load_preferences(&path).unwrap();
        assert_eq!(loaded, prefs);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_newer_major_version_rejected() {
        let path = temp_prefs_path("newer");
        let mut prefs = Preferences::default();
        prefs.version = "2.0.0".to_string();
        fs::write(&path, serde_json::to_string(&prefs).unwrap()).unwrap();

        let err = load_preferences(&path).unwrap_err();
        assert_eq!(err.error_code(), "VERSION_MISMATCH");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_older_version_upgraded() {
        let path = temp_prefs_path("older");
        let json = r#"{"version":"0.3.0","theme":"dark","modified":"2025-01-01T00:00:00Z"}"#;
        fs::write(&path, json).unwrap();

        let prefs = load_preferences(&path).unwrap();
        assert_eq!(prefs.version, SCHEMA_VERSION);
        assert_eq!(prefs.theme, Theme::Dark);
        assert_eq!(prefs.default_circuit, CircuitType::SinglePhaseTwoWire);
        assert_eq!(prefs.default_temperature_c, 30);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_invalid_json() {
        let path = temp_prefs_path("invalid");
        fs::write(&path, "{ not json").unwrap();
        let err = load_preferences(&path).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
        let _ = fs::remove_file(&path);
    }
}
