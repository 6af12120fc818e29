//! Settings types.
//!
//! A settings file is optional; every field falls back to the layout Roddy
//! writes by default.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::validate::{validate_settings, ValidationResult};

/// Complete settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_schema_version")]
    pub schema_version: String,

    #[serde(default)]
    pub layout: StoreLayout,

    #[serde(default)]
    pub summarizer: SummarizerSettings,
}

/// Names Roddy uses inside a roddyExecutionStore.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreLayout {
    /// Prefix of run directories directly below the store.
    pub execution_dir_prefix: String,

    /// Suffix of the per-job parameter dumps inside a run directory.
    pub parameter_file_suffix: String,

    /// File name of the version record inside a run directory.
    pub versions_info_file: String,
}

/// Limits for external summarizer commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarizerSettings {
    /// Wall-clock limit for one summarizer invocation.
    pub timeout_ms: u64,

    /// Upper bound on summarizer stdout.
    pub max_output_bytes: usize,
}

fn default_schema_version() -> String {
    crate::CONFIG_SCHEMA_VERSION.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            layout: StoreLayout::default(),
            summarizer: SummarizerSettings::default(),
        }
    }
}

impl Default for StoreLayout {
    fn default() -> Self {
        Self {
            execution_dir_prefix: "exec_".to_string(),
            parameter_file_suffix: ".parameters".to_string(),
            versions_info_file: "versionsInfo.txt".to_string(),
        }
    }
}

impl Default for SummarizerSettings {
    fn default() -> Self {
        Self {
            timeout_ms: 30_000,
            max_output_bytes: 4 * 1024 * 1024,
        }
    }
}

/// Errors while loading a settings file.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid settings: {0}")]
    Invalid(String),
}

impl Settings {
    /// Parse settings from JSON and validate them.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        let result = settings.validate();
        if !result.is_valid() {
            return Err(SettingsError::Invalid(result.summary()));
        }
        Ok(settings)
    }

    /// Load and validate a settings file.
    pub fn load_from_file(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&content)
    }

    pub fn validate(&self) -> ValidationResult {
        validate_settings(self)
    }
}

impl From<SettingsError> for rcg_common::Error {
    fn from(err: SettingsError) -> Self {
        match err {
            SettingsError::Invalid(msg) if msg.contains("schema_version") => {
                rcg_common::Error::IncompatibleSchema(msg)
            }
            other => rcg_common::Error::Config(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_roddy_layout() {
        let settings = Settings::default();
        assert_eq!(settings.layout.execution_dir_prefix, "exec_");
        assert_eq!(settings.layout.parameter_file_suffix, ".parameters");
        assert_eq!(settings.layout.versions_info_file, "versionsInfo.txt");
        assert!(settings.validate().is_valid());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let settings = Settings::from_json(r#"{"layout": {"parameter_file_suffix": ".params"}}"#)
            .unwrap();
        assert_eq!(settings.layout.parameter_file_suffix, ".params");
        assert_eq!(settings.layout.execution_dir_prefix, "exec_");
        assert_eq!(settings.summarizer, SummarizerSettings::default());
        assert_eq!(settings.schema_version, crate::CONFIG_SCHEMA_VERSION);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = Settings::from_json(r#"{"summarizer": {"timeout_ms": 0}}"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));
    }

    #[test]
    fn test_bad_json_rejected() {
        let err = Settings::from_json("{ not json").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_incompatible_schema_maps_to_common_error() {
        let err = Settings::from_json(r#"{"schema_version": "2.0.0"}"#).unwrap_err();
        let common: rcg_common::Error = err.into();
        assert!(matches!(common, rcg_common::Error::IncompatibleSchema(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Settings::load_from_file(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, SettingsError::Io { .. }));
    }
}
